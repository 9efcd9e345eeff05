//! Graphviz DOT renderer
//!
//! Emits a `digraph` with one record node per task and one rank per level,
//! so `dot -Tsvg` lays the plan out left to right by depth.

use critpath_core::{Plan, RenderError, Renderer, Schedule, TaskId};

/// Graphviz DOT renderer configuration
#[derive(Clone, Debug)]
pub struct DotRenderer {
    /// Graph name in the `digraph` header
    pub graph_name: String,
    /// Pin tasks of the same level to the same rank
    pub rank_by_level: bool,
    /// Color for critical nodes and edges
    pub critical_color: String,
    /// Color for everything else
    pub normal_color: String,
    /// Font family
    pub font_family: String,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            graph_name: "plan".into(),
            rank_by_level: true,
            critical_color: "#e74c3c".into(),
            normal_color: "#3498db".into(),
            font_family: "Helvetica".into(),
        }
    }
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Let Graphviz choose ranks freely
    pub fn free_ranks(mut self) -> Self {
        self.rank_by_level = false;
        self
    }

    pub fn critical_color(mut self, color: impl Into<String>) -> Self {
        self.critical_color = color.into();
        self
    }

    /// Escape characters with meaning inside record labels
    fn escape_record(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    fn escape_quoted(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }

    fn make_id(id: TaskId) -> String {
        format!("t{}", id.number())
    }
}

impl Renderer for DotRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, schedule: &Schedule) -> Result<String, RenderError> {
        if plan.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }

        let mut output = String::new();
        output.push_str(&format!(
            "digraph \"{}\" {{\n",
            Self::escape_quoted(&self.graph_name)
        ));
        output.push_str("    rankdir=LR;\n");
        output.push_str(&format!(
            "    node [shape=record, fontname=\"{}\", color=\"{}\"];\n",
            Self::escape_quoted(&self.font_family),
            self.normal_color
        ));
        output.push_str(&format!("    edge [color=\"{}\"];\n\n", self.normal_color));

        for task in plan.tasks() {
            let s = schedule.task(task.id());
            let label = format!(
                "{{{} | dur {}}} | {{ES {} | EF {}}} | {{LS {} | LF {}}} | {{TF {} | FF {}}}",
                Self::escape_record(task.name()),
                task.duration(),
                s.early_start,
                s.early_finish,
                s.late_start,
                s.late_finish,
                s.total_float,
                s.free_float
            );
            let style = if s.is_critical() {
                format!(", color=\"{}\", penwidth=2", self.critical_color)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "    {} [label=\"{}\"{}];\n",
                Self::make_id(task.id()),
                label,
                style
            ));
        }

        if self.rank_by_level {
            output.push('\n');
            for ids in &schedule.levels {
                let members: Vec<String> = ids.iter().map(|&id| Self::make_id(id)).collect();
                output.push_str(&format!("    {{ rank=same; {}; }}\n", members.join("; ")));
            }
        }

        output.push('\n');
        for edge in plan.edges() {
            let style = if schedule.is_critical_edge(edge.from, edge.to) {
                format!(" [color=\"{}\", penwidth=2]", self.critical_color)
            } else {
                String::new()
            };
            output.push_str(&format!(
                "    {} -> {}{};\n",
                Self::make_id(edge.from),
                Self::make_id(edge.to),
                style
            ));
        }

        output.push_str("}\n");
        Ok(output)
    }
}
