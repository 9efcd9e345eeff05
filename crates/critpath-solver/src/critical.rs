//! Critical path extraction

use critpath_core::{ScheduledTask, TaskId};

/// Every zero-float task, ordered by level.
///
/// `rows` must be in insertion order; the sort is stable so tasks on the
/// same level keep that order.
pub fn extract_critical_path(rows: &[ScheduledTask]) -> Vec<TaskId> {
    let mut critical: Vec<&ScheduledTask> = rows.iter().filter(|r| r.is_critical()).collect();
    critical.sort_by_key(|r| r.level);
    critical.into_iter().map(|r| r.task_id).collect()
}
