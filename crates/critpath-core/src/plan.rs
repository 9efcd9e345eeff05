//! Plan construction and validation
//!
//! The plan is the single owner of every task. Tasks live in one arena and
//! refer to each other by [`TaskId`], so predecessor/successor links never
//! form ownership cycles.
//!
//! Insertion order is a topological order: a task can only name
//! predecessors that were added before it. Forward references are rejected
//! with [`PlanError::UnknownPredecessor`], which is also what rules out
//! cycles. There is no separate cycle search.

use std::collections::HashMap;

use serde::Serialize;

use crate::{PlanError, Task, TaskId};

/// A dependency edge, predecessor to successor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Predecessor task
    pub from: TaskId,
    /// Successor task
    pub to: TaskId,
}

/// A validated, acyclic task graph
#[derive(Clone, Debug, Default, Serialize)]
pub struct Plan {
    tasks: Vec<Task>,
    #[serde(skip)]
    by_name: HashMap<String, TaskId>,
    /// Longest path length ending at each task; bounds every schedule time
    #[serde(skip)]
    path_finish: Vec<i64>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task after all of its predecessors.
    ///
    /// Rules are checked in this order: non-empty name, unique name, no
    /// self dependency, positive duration, every predecessor already
    /// defined, and the longest path through the task fits in `i64`.
    /// On error the plan is left untouched. A predecessor listed more than
    /// once is linked once.
    pub fn add_task(
        &mut self,
        name: &str,
        duration: i64,
        predecessors: &[&str],
    ) -> Result<TaskId, PlanError> {
        if name.is_empty() {
            return Err(PlanError::EmptyName);
        }
        if self.by_name.contains_key(name) {
            return Err(PlanError::DuplicateTask { name: name.into() });
        }
        if predecessors.iter().any(|p| *p == name) {
            return Err(PlanError::SelfDependency { name: name.into() });
        }
        if duration <= 0 {
            return Err(PlanError::InvalidDuration {
                name: name.into(),
                duration,
            });
        }

        // Resolve everything before touching the arena
        let mut resolved: Vec<TaskId> = Vec::with_capacity(predecessors.len());
        for pred in predecessors {
            let pred_id =
                self.by_name
                    .get(*pred)
                    .copied()
                    .ok_or_else(|| PlanError::UnknownPredecessor {
                        name: name.into(),
                        predecessor: (*pred).into(),
                    })?;
            if !resolved.contains(&pred_id) {
                resolved.push(pred_id);
            }
        }

        let path_start = resolved
            .iter()
            .map(|pred_id| self.path_finish[pred_id.index()])
            .max()
            .unwrap_or(0);
        let path_finish =
            path_start
                .checked_add(duration)
                .ok_or_else(|| PlanError::DurationOverflow {
                    name: name.into(),
                    duration,
                })?;

        let id = TaskId::new(self.tasks.len());
        for pred_id in &resolved {
            self.tasks[pred_id.index()].link_successor(id);
        }
        self.tasks
            .push(Task::new(id, name.to_string(), duration, resolved));
        self.by_name.insert(name.to_string(), id);
        self.path_finish.push(path_finish);

        Ok(id)
    }

    /// Exact, case-sensitive lookup by name
    pub fn find_task(&self, name: &str) -> Option<&Task> {
        self.by_name.get(name).map(|id| &self.tasks[id.index()])
    }

    /// Task by id.
    ///
    /// Panics if `id` was issued by another plan.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.index()]
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    /// All tasks in insertion (= topological) order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All task ids in insertion order
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = TaskId> + ExactSizeIterator + '_ {
        self.tasks.iter().map(Task::id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks with no predecessors
    pub fn sources(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(|t| t.is_source())
    }

    /// Tasks with no successors
    pub fn sinks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(|t| t.is_sink())
    }

    /// Every dependency edge, grouped by successor in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.tasks.iter().flat_map(|task| {
            task.predecessors().iter().map(move |&from| Edge {
                from,
                to: task.id(),
            })
        })
    }
}
