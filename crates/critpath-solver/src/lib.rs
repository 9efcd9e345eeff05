//! # critpath-solver
//!
//! Scheduling solver implementing the Critical Path Method (CPM).
//!
//! This crate provides:
//! - Forward/backward pass scheduling
//! - Total and free float calculations
//! - Level (longest-path depth) classification
//! - Critical path identification
//!
//! ## Example
//!
//! ```rust
//! use critpath_core::{Plan, Scheduler};
//! use critpath_solver::CpmSolver;
//!
//! let mut plan = Plan::new();
//! plan.add_task("A", 3, &[]).unwrap();
//! plan.add_task("B", 2, &["A"]).unwrap();
//!
//! let schedule = CpmSolver::new().schedule(&plan).unwrap();
//! assert_eq!(schedule.project_finish, 5);
//! assert_eq!(schedule.critical_path.len(), 2);
//! ```

pub mod cpm;
pub mod critical;
pub mod levels;

pub use cpm::SinkAnchor;

use critpath_core::{Plan, Schedule, ScheduleError, ScheduledTask, Scheduler};
use tracing::debug;

/// CPM-based scheduler
#[derive(Clone, Debug, Default)]
pub struct CpmSolver {
    /// Late-finish anchor used for sink tasks
    pub anchor: SinkAnchor,
}

impl CpmSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how sinks are anchored in the backward pass
    pub fn with_anchor(mut self, anchor: SinkAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

impl Scheduler for CpmSolver {
    /// Run every phase in fixed order: forward, backward, float, levels,
    /// critical path. Each phase finishes for all tasks before the next.
    fn schedule(&self, plan: &Plan) -> Result<Schedule, ScheduleError> {
        let mut rows: Vec<ScheduledTask> = plan.ids().map(ScheduledTask::unscheduled).collect();

        cpm::forward_pass(plan, &mut rows)?;
        let project_finish = cpm::project_finish(&rows);
        debug!(tasks = plan.len(), project_finish, "forward pass done");

        cpm::backward_pass(plan, &mut rows, self.anchor)?;
        debug!(anchor = ?self.anchor, "backward pass done");

        cpm::compute_float(plan, &mut rows)?;

        let levels = levels::classify_levels(plan, &mut rows);
        debug!(levels = levels.len(), "levels classified");

        let critical_path = critical::extract_critical_path(&rows);
        debug!(critical = critical_path.len(), "critical path extracted");

        Ok(Schedule {
            tasks: rows,
            levels,
            critical_path,
            project_finish,
        })
    }
}
