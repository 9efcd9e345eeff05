//! # critpath-render
//!
//! Rendering backends for critpath schedules.
//!
//! This crate provides:
//! - Text-based table output for terminals
//! - MermaidJS flowchart rendering (for Markdown/docs)
//! - Graphviz DOT rendering (for `dot`, `xdot` and friends)
//!
//! Every backend distinguishes critical edges (both endpoints zero-float)
//! from the rest.
//!
//! ## Example
//!
//! ```rust
//! use critpath_core::{Plan, Renderer, Scheduler};
//! use critpath_render::{MermaidRenderer, TextRenderer};
//! use critpath_solver::CpmSolver;
//!
//! let mut plan = Plan::new();
//! plan.add_task("A", 3, &[]).unwrap();
//! plan.add_task("B", 2, &["A"]).unwrap();
//! let schedule = CpmSolver::new().schedule(&plan).unwrap();
//!
//! let table = TextRenderer::new().render(&plan, &schedule).unwrap();
//! assert!(table.contains("Critical path: A -> B"));
//!
//! let mermaid = MermaidRenderer::new().render(&plan, &schedule).unwrap();
//! assert!(mermaid.contains("t1 ==> t2"));
//! ```

pub mod dot;
pub mod mermaid;

pub use dot::DotRenderer;
pub use mermaid::MermaidRenderer;

use std::fmt::Write;

use critpath_core::{Plan, RenderError, Renderer, Schedule};

/// Plain text renderer for console output
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Append the level → tasks summary
    pub show_levels: bool,
    /// Marker printed in the last column for critical tasks
    pub critical_marker: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            show_levels: true,
            critical_marker: "*".into(),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit the level summary
    pub fn no_levels(mut self) -> Self {
        self.show_levels = false;
        self
    }

    pub fn critical_marker(mut self, marker: impl Into<String>) -> Self {
        self.critical_marker = marker.into();
        self
    }

    fn names(plan: &Plan, ids: &[critpath_core::TaskId]) -> Vec<String> {
        ids.iter().map(|&id| plan.task(id).name().to_string()).collect()
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, schedule: &Schedule) -> Result<String, RenderError> {
        let mut out = String::new();
        if plan.is_empty() {
            writeln!(out, "(no tasks)")?;
            return Ok(out);
        }

        let name_width = plan
            .tasks()
            .iter()
            .map(|t| t.name().chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}  Crit",
            "#", "Task", "Dur", "ES", "EF", "LS", "LF", "TF", "FF", "Lvl",
        )?;

        for task in plan.tasks() {
            let s = schedule
                .get(task.id())
                .ok_or_else(|| RenderError::InvalidData(format!("task '{}' is not scheduled", task.name())))?;
            let marker = if s.is_critical() {
                self.critical_marker.as_str()
            } else {
                ""
            };
            writeln!(
                out,
                "{:>4}  {:<name_width$}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}  {}",
                task.id().number(),
                task.name(),
                task.duration(),
                s.early_start,
                s.early_finish,
                s.late_start,
                s.late_finish,
                s.total_float,
                s.free_float,
                s.level,
                marker,
            )?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Critical path: {}",
            Self::names(plan, &schedule.critical_path).join(" -> ")
        )?;

        if self.show_levels {
            writeln!(out, "Levels:")?;
            for (level, ids) in schedule.levels.iter().enumerate() {
                writeln!(
                    out,
                    "  {:>3} ({}): {}",
                    level,
                    ids.len(),
                    Self::names(plan, ids).join(", ")
                )?;
            }
        }

        writeln!(out, "Project finish: {}", schedule.project_finish)?;
        Ok(out)
    }
}
