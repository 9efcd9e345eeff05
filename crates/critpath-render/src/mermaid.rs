//! MermaidJS flowchart renderer
//!
//! Generates a left-to-right activity-on-node diagram in MermaidJS format,
//! suitable for embedding in Markdown documentation, GitHub and wikis.
//!
//! ## Example Output
//!
//! ```text
//! flowchart LR
//!     classDef critical fill:#e74c3c,stroke:#c0392b,color:#ffffff
//!
//!     subgraph level0["Level 0"]
//!         t1["A<br/>dur 3<br/>ES 0 | EF 3<br/>LS 0 | LF 3<br/>TF 0 | FF 0"]
//!     end
//!     subgraph level1["Level 1"]
//!         t2["B<br/>dur 2<br/>ES 3 | EF 5<br/>LS 5 | LF 7<br/>TF 2 | FF 2"]
//!     end
//!
//!     t1 --> t2
//!     class t1 critical
//! ```

use critpath_core::{Plan, RenderError, Renderer, Schedule, TaskId};

/// MermaidJS flowchart renderer
#[derive(Clone, Debug)]
pub struct MermaidRenderer {
    /// Group nodes into one subgraph per level
    pub show_levels: bool,
    /// Highlight critical nodes and edges
    pub show_critical: bool,
    /// Include the computed times in node labels
    pub show_times: bool,
    /// Fill color for critical nodes and edge color for critical edges
    pub critical_color: String,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            show_levels: true,
            show_critical: true,
            show_times: true,
            critical_color: "#e74c3c".into(),
        }
    }
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable level subgraphs
    pub fn no_levels(mut self) -> Self {
        self.show_levels = false;
        self
    }

    /// Disable critical path highlighting
    pub fn no_critical(mut self) -> Self {
        self.show_critical = false;
        self
    }

    /// Only show name and duration in node labels
    pub fn no_times(mut self) -> Self {
        self.show_times = false;
        self
    }

    /// Set the highlight color
    pub fn critical_color(mut self, color: impl Into<String>) -> Self {
        self.critical_color = color.into();
        self
    }

    /// Escape characters Mermaid treats specially inside quoted labels
    fn sanitize_name(name: &str) -> String {
        name.replace('"', "#quot;")
            .replace('<', "#lt;")
            .replace('>', "#gt;")
            .replace('\n', " ")
            .replace('\r', "")
    }

    /// Node ids are derived from task numbers, so names never need escaping there
    fn make_id(id: TaskId) -> String {
        format!("t{}", id.number())
    }

    fn node_line(&self, plan: &Plan, schedule: &Schedule, id: TaskId) -> String {
        let task = plan.task(id);
        let s = schedule.task(id);
        let mut label = format!(
            "{}<br/>dur {}",
            Self::sanitize_name(task.name()),
            task.duration()
        );
        if self.show_times {
            label.push_str(&format!(
                "<br/>ES {} | EF {}<br/>LS {} | LF {}<br/>TF {} | FF {}",
                s.early_start,
                s.early_finish,
                s.late_start,
                s.late_finish,
                s.total_float,
                s.free_float
            ));
        }
        format!("{}[\"{}\"]", Self::make_id(id), label)
    }
}

impl Renderer for MermaidRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, schedule: &Schedule) -> Result<String, RenderError> {
        if plan.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }

        let mut output = String::new();
        output.push_str("flowchart LR\n");
        if self.show_critical {
            output.push_str(&format!(
                "    classDef critical fill:{},stroke:#c0392b,color:#ffffff\n",
                self.critical_color
            ));
        }
        output.push('\n');

        // Nodes
        if self.show_levels {
            for (level, ids) in schedule.levels.iter().enumerate() {
                output.push_str(&format!("    subgraph level{}[\"Level {}\"]\n", level, level));
                for &id in ids {
                    output.push_str(&format!("        {}\n", self.node_line(plan, schedule, id)));
                }
                output.push_str("    end\n");
            }
        } else {
            for id in plan.ids() {
                output.push_str(&format!("    {}\n", self.node_line(plan, schedule, id)));
            }
        }
        output.push('\n');

        // Edges; linkStyle indices follow definition order
        let mut critical_links = Vec::new();
        for (index, edge) in plan.edges().enumerate() {
            let critical = self.show_critical && schedule.is_critical_edge(edge.from, edge.to);
            let arrow = if critical { "==>" } else { "-->" };
            if critical {
                critical_links.push(index.to_string());
            }
            output.push_str(&format!(
                "    {} {} {}\n",
                Self::make_id(edge.from),
                arrow,
                Self::make_id(edge.to)
            ));
        }

        if self.show_critical {
            let critical_nodes: Vec<String> = plan
                .ids()
                .filter(|&id| schedule.task(id).is_critical())
                .map(Self::make_id)
                .collect();
            if !critical_nodes.is_empty() {
                output.push_str(&format!("    class {} critical\n", critical_nodes.join(",")));
            }
            if !critical_links.is_empty() {
                output.push_str(&format!(
                    "    linkStyle {} stroke:{},stroke-width:3px\n",
                    critical_links.join(","),
                    self.critical_color
                ));
            }
        }

        Ok(output)
    }
}
