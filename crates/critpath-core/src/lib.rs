//! # critpath-core
//!
//! Core domain model and traits for the critpath scheduling engine.
//!
//! This crate provides:
//! - Domain types: `Plan`, `Task`, `TaskId`, `Schedule`, `ScheduledTask`
//! - Core traits: `Scheduler`, `Renderer`
//! - Error types for construction, scheduling and rendering
//!
//! ## Example
//!
//! ```rust
//! use critpath_core::Plan;
//!
//! let mut plan = Plan::new();
//! let design = plan.add_task("design", 3, &[]).unwrap();
//! let build = plan.add_task("build", 5, &["design"]).unwrap();
//!
//! assert_eq!(plan.task(build).predecessors(), &[design]);
//! assert_eq!(plan.task(design).successors(), &[build]);
//! ```

pub mod plan;

pub use plan::{Edge, Plan};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identifier of a task inside its [`Plan`].
///
/// Identifiers are handed out sequentially in insertion order, so the
/// ordering of `TaskId`s is also a valid topological order of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(usize);

impl TaskId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in the plan's arena
    pub const fn index(self) -> usize {
        self.0
    }

    /// One-based sequential number, as shown to users
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.number())
    }
}

// ============================================================================
// Task
// ============================================================================

/// A schedulable unit of work.
///
/// Tasks are created through [`Plan::add_task`] and are read-only for
/// everybody else. Dependency links are arena indices, not owning references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    name: String,
    duration: i64,
    predecessors: Vec<TaskId>,
    successors: Vec<TaskId>,
}

impl Task {
    pub(crate) fn new(id: TaskId, name: String, duration: i64, predecessors: Vec<TaskId>) -> Self {
        Self {
            id,
            name,
            duration,
            predecessors,
            successors: Vec::new(),
        }
    }

    pub(crate) fn link_successor(&mut self, successor: TaskId) {
        self.successors.push(successor);
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in time units, always positive
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Direct predecessors, in the order they were declared
    pub fn predecessors(&self) -> &[TaskId] {
        &self.predecessors
    }

    /// Direct successors, in the order they were added to the plan
    pub fn successors(&self) -> &[TaskId] {
        &self.successors
    }

    /// A task without predecessors
    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// A task without successors
    pub fn is_sink(&self) -> bool {
        self.successors.is_empty()
    }
}

// ============================================================================
// Schedule (Result)
// ============================================================================

/// Computed CPM values for a single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task this row belongs to
    pub task_id: TaskId,
    /// Early Start (time units from project start)
    pub early_start: i64,
    /// Early Finish
    pub early_finish: i64,
    /// Late Start
    pub late_start: i64,
    /// Late Finish
    pub late_finish: i64,
    /// Total float: LS - ES
    pub total_float: i64,
    /// Free float: min(ES of successors) - EF, 0 for sinks
    pub free_float: i64,
    /// Longest path, in edges, from any source task
    pub level: u32,
}

impl ScheduledTask {
    /// Fresh row with every computed field at zero
    pub fn unscheduled(task_id: TaskId) -> Self {
        Self {
            task_id,
            early_start: 0,
            early_finish: 0,
            late_start: 0,
            late_finish: 0,
            total_float: 0,
            free_float: 0,
            level: 0,
        }
    }

    /// On the critical path (total float == 0)
    pub fn is_critical(&self) -> bool {
        self.total_float == 0
    }
}

/// The result of scheduling a plan
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// One row per task, indexed by `TaskId::index`
    pub tasks: Vec<ScheduledTask>,
    /// Level buckets: `levels[n]` holds the tasks at level `n` in insertion order
    pub levels: Vec<Vec<TaskId>>,
    /// Zero-float tasks ordered by level, ties in insertion order
    pub critical_path: Vec<TaskId>,
    /// Maximum early finish over all tasks
    pub project_finish: i64,
}

impl Schedule {
    /// Computed values for `id`.
    ///
    /// Panics if `id` does not belong to the plan this schedule was built from.
    pub fn task(&self, id: TaskId) -> &ScheduledTask {
        &self.tasks[id.index()]
    }

    pub fn get(&self, id: TaskId) -> Option<&ScheduledTask> {
        self.tasks.get(id.index())
    }

    /// Highest level observed, `None` for an empty schedule
    pub fn max_level(&self) -> Option<u32> {
        self.levels.len().checked_sub(1).map(|level| level as u32)
    }

    /// Tasks at `level`, in insertion order
    pub fn tasks_at_level(&self, level: u32) -> &[TaskId] {
        self.levels
            .get(level as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of tasks per level, indexed by level
    pub fn level_counts(&self) -> Vec<usize> {
        self.levels.iter().map(Vec::len).collect()
    }

    /// Whether both endpoints of an edge have zero total float
    pub fn is_critical_edge(&self, from: TaskId, to: TaskId) -> bool {
        match (self.get(from), self.get(to)) {
            (Some(a), Some(b)) => a.is_critical() && b.is_critical(),
            _ => false,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Core scheduling abstraction
pub trait Scheduler: Send + Sync {
    /// Compute a schedule for the given plan
    fn schedule(&self, plan: &Plan) -> Result<Schedule, ScheduleError>;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a schedule to the output format
    fn render(&self, plan: &Plan, schedule: &Schedule) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Plan construction error.
///
/// Every variant names the rule that was violated and the offending task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("duplicate task: '{name}' is already defined")]
    DuplicateTask { name: String },

    #[error("self dependency: task '{name}' lists itself as a predecessor")]
    SelfDependency { name: String },

    #[error("invalid duration: task '{name}' has duration {duration}, expected a positive integer")]
    InvalidDuration { name: String, duration: i64 },

    #[error("unknown predecessor: task '{name}' depends on '{predecessor}', which is not defined before it")]
    UnknownPredecessor { name: String, predecessor: String },

    #[error("empty task name")]
    EmptyName,

    #[error("duration overflow: the longest path through task '{name}' (duration {duration}) exceeds the 64-bit time range")]
    DurationOverflow { name: String, duration: i64 },
}

impl PlanError {
    /// Name of the task that was being added, if any
    pub fn task_name(&self) -> Option<&str> {
        match self {
            PlanError::DuplicateTask { name }
            | PlanError::SelfDependency { name }
            | PlanError::InvalidDuration { name, .. }
            | PlanError::UnknownPredecessor { name, .. }
            | PlanError::DurationOverflow { name, .. } => Some(name),
            PlanError::EmptyName => None,
        }
    }
}

/// Scheduling error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("CPM invariant violated: task '{task}' has negative total float ({float})")]
    NegativeFloat { task: String, float: i64 },

    /// A time left the `i64` range. Plans built through [`Plan::add_task`]
    /// never reach this.
    #[error("CPM invariant violated: time of task '{task}' overflows")]
    Overflow { task: String },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<std::fmt::Error> for RenderError {
    fn from(err: std::fmt::Error) -> Self {
        RenderError::Format(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_numbers_are_one_based() {
        let id = TaskId::new(0);
        assert_eq!(id.index(), 0);
        assert_eq!(id.number(), 1);
        assert_eq!(id.to_string(), "#1");
    }

    #[test]
    fn unscheduled_task_is_all_zero() {
        let row = ScheduledTask::unscheduled(TaskId::new(3));
        assert_eq!(row.early_start, 0);
        assert_eq!(row.late_finish, 0);
        assert_eq!(row.level, 0);
        assert!(row.is_critical());
    }

    #[test]
    fn schedule_level_accessors() {
        let schedule = Schedule {
            tasks: vec![
                ScheduledTask::unscheduled(TaskId::new(0)),
                ScheduledTask::unscheduled(TaskId::new(1)),
                ScheduledTask::unscheduled(TaskId::new(2)),
            ],
            levels: vec![vec![TaskId::new(0)], vec![TaskId::new(1), TaskId::new(2)]],
            critical_path: vec![],
            project_finish: 0,
        };

        assert_eq!(schedule.max_level(), Some(1));
        assert_eq!(schedule.level_counts(), vec![1, 2]);
        assert_eq!(schedule.tasks_at_level(1), &[TaskId::new(1), TaskId::new(2)]);
        assert!(schedule.tasks_at_level(7).is_empty());
    }

    #[test]
    fn empty_schedule_has_no_max_level() {
        let schedule = Schedule::default();
        assert_eq!(schedule.max_level(), None);
        assert!(schedule.get(TaskId::new(0)).is_none());
    }

    #[test]
    fn critical_edge_needs_both_endpoints_critical() {
        let mut slack = ScheduledTask::unscheduled(TaskId::new(1));
        slack.total_float = 2;
        let schedule = Schedule {
            tasks: vec![
                ScheduledTask::unscheduled(TaskId::new(0)),
                slack,
                ScheduledTask::unscheduled(TaskId::new(2)),
            ],
            ..Schedule::default()
        };

        assert!(schedule.is_critical_edge(TaskId::new(0), TaskId::new(2)));
        assert!(!schedule.is_critical_edge(TaskId::new(0), TaskId::new(1)));
        assert!(!schedule.is_critical_edge(TaskId::new(0), TaskId::new(9)));
    }

    #[test]
    fn plan_error_display_names_rule_and_task() {
        let err = PlanError::UnknownPredecessor {
            name: "deploy".into(),
            predecessor: "build".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unknown predecessor"));
        assert!(msg.contains("deploy"));
        assert!(msg.contains("build"));
        assert_eq!(err.task_name(), Some("deploy"));

        let err = PlanError::InvalidDuration {
            name: "x".into(),
            duration: -2,
        };
        assert!(err.to_string().contains("-2"));
        assert_eq!(PlanError::EmptyName.task_name(), None);
    }

    #[test]
    fn schedule_error_display() {
        let err = ScheduleError::NegativeFloat {
            task: "late".into(),
            float: -5,
        };
        let msg = err.to_string();
        assert!(msg.contains("late"));
        assert!(msg.contains("-5"));
    }
}
