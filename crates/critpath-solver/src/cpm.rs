//! Critical Path Method Implementation
//!
//! Textbook CPM passes operating on a validated [`Plan`].
//!
//! References:
//!   - Kelley & Walker (1959) "Critical-Path Planning and Scheduling"
//!   - PMI PMBOK Guide, Chapter 6
//!
//! # Algorithm
//!
//! 1. Forward pass: Compute ES (Early Start) and EF (Early Finish)
//! 2. Backward pass: Compute LS (Late Start) and LF (Late Finish)
//! 3. Float calculation: TF = LS - ES (must be >= 0), FF against successors
//!
//! No topological sort is needed: the plan's insertion order already is one.

use critpath_core::{Plan, ScheduleError, ScheduledTask};
use tracing::trace;

/// Where the backward pass anchors the late finish of a sink task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SinkAnchor {
    /// Each sink's late finish equals its own early finish
    #[default]
    OwnFinish,
    /// Every sink's late finish equals the project finish (max EF)
    ProjectFinish,
}

/// Fill `early_start`/`early_finish` for every task.
///
/// For each task in insertion order:
///   ES = max(EF of predecessors), or 0 for a source
///   EF = ES + duration
pub fn forward_pass(plan: &Plan, rows: &mut [ScheduledTask]) -> Result<(), ScheduleError> {
    for task in plan.tasks() {
        let early_start = task
            .predecessors()
            .iter()
            .map(|pred| rows[pred.index()].early_finish)
            .max()
            .unwrap_or(0);

        let row = &mut rows[task.id().index()];
        row.early_start = early_start;
        row.early_finish = early_start
            .checked_add(task.duration())
            .ok_or_else(|| overflow(task.name()))?;
        trace!(task = task.name(), es = row.early_start, ef = row.early_finish, "forward");
    }

    Ok(())
}

/// Maximum early finish; 0 for an empty plan
pub fn project_finish(rows: &[ScheduledTask]) -> i64 {
    rows.iter().map(|r| r.early_finish).max().unwrap_or(0)
}

/// Fill `late_start`/`late_finish` for every task.
///
/// For each task in REVERSE insertion order:
///   LF = min(LS of successors), or the sink anchor
///   LS = LF - duration
pub fn backward_pass(
    plan: &Plan,
    rows: &mut [ScheduledTask],
    anchor: SinkAnchor,
) -> Result<(), ScheduleError> {
    let finish = project_finish(rows);

    for task in plan.tasks().iter().rev() {
        let idx = task.id().index();
        let late_finish = task
            .successors()
            .iter()
            .map(|succ| rows[succ.index()].late_start)
            .min()
            .unwrap_or(match anchor {
                SinkAnchor::OwnFinish => rows[idx].early_finish,
                SinkAnchor::ProjectFinish => finish,
            });

        let row = &mut rows[idx];
        row.late_finish = late_finish;
        row.late_start = late_finish
            .checked_sub(task.duration())
            .ok_or_else(|| overflow(task.name()))?;
        trace!(task = task.name(), ls = row.late_start, lf = row.late_finish, "backward");
    }

    Ok(())
}

/// Fill `total_float`/`free_float` for every task.
///
/// Total Float = LS - ES (must be >= 0)
/// Free Float  = min(ES of successors) - EF, or 0 for a sink
///
/// Both passes must have completed for every task.
pub fn compute_float(plan: &Plan, rows: &mut [ScheduledTask]) -> Result<(), ScheduleError> {
    for task in plan.tasks() {
        let idx = task.id().index();
        let total_float = rows[idx]
            .late_start
            .checked_sub(rows[idx].early_start)
            .ok_or_else(|| overflow(task.name()))?;

        if total_float < 0 {
            return Err(ScheduleError::NegativeFloat {
                task: task.name().to_string(),
                float: total_float,
            });
        }

        let free_float = task
            .successors()
            .iter()
            .map(|succ| rows[succ.index()].early_start)
            .min()
            .map_or(Some(0), |min_succ_es| {
                min_succ_es.checked_sub(rows[idx].early_finish)
            })
            .ok_or_else(|| overflow(task.name()))?;

        let row = &mut rows[idx];
        row.total_float = total_float;
        row.free_float = free_float;
    }

    Ok(())
}

fn overflow(task: &str) -> ScheduleError {
    ScheduleError::Overflow {
        task: task.to_string(),
    }
}
