//! Level classification
//!
//! A task's level is the length, in edges, of the longest path reaching it
//! from any source. Levels are propagated with an explicit worklist rather
//! than recursion so deep chains cannot exhaust the stack.

use std::collections::VecDeque;

use critpath_core::{Plan, ScheduledTask, TaskId};
use tracing::trace;

/// Assign `level` to every row and return the level buckets.
///
/// Every source enters the worklist at level 0. Popping `(task, level)`
/// raises each successor to `level + 1` if that is higher than what it
/// already has, and re-enqueues the successor whenever it was raised.
/// Levels only ever go up, so the result is the maximum over all incoming
/// paths regardless of visiting order.
///
/// Buckets are indexed by level and keep insertion order within a level.
pub fn classify_levels(plan: &Plan, rows: &mut [ScheduledTask]) -> Vec<Vec<TaskId>> {
    for row in rows.iter_mut() {
        row.level = 0;
    }

    let mut worklist: VecDeque<(TaskId, u32)> =
        plan.sources().map(|task| (task.id(), 0)).collect();
    let mut max_level = 0u32;

    while let Some((id, level)) = worklist.pop_front() {
        max_level = max_level.max(level);
        let next = level + 1;

        for &succ in plan.task(id).successors() {
            let row = &mut rows[succ.index()];
            if next > row.level {
                row.level = next;
                trace!(task = plan.task(succ).name(), level = next, "raised");
                worklist.push_back((succ, next));
            }
        }
    }

    if plan.is_empty() {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<TaskId>> = vec![Vec::new(); max_level as usize + 1];
    for id in plan.ids() {
        buckets[rows[id.index()].level as usize].push(id);
    }
    buckets
}
