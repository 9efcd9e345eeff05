//! JSON output
//!
//! Task references are resolved to names so the document stands on its own.

use critpath_core::{Plan, RenderError, Renderer, Schedule, TaskId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonTask<'a> {
    pub id: usize,
    pub name: &'a str,
    pub duration: i64,
    pub predecessors: Vec<&'a str>,
    pub successors: Vec<&'a str>,
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub free_float: i64,
    pub level: u32,
    pub critical: bool,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub project_finish: i64,
    pub critical_path: Vec<&'a str>,
    pub levels: Vec<Vec<&'a str>>,
    pub tasks: Vec<JsonTask<'a>>,
}

impl<'a> JsonReport<'a> {
    pub fn new(plan: &'a Plan, schedule: &'a Schedule) -> Self {
        let names = |ids: &[TaskId]| -> Vec<&'a str> {
            ids.iter().map(|&id| plan.task(id).name()).collect()
        };

        let tasks = plan
            .tasks()
            .iter()
            .map(|task| {
                let s = schedule.task(task.id());
                JsonTask {
                    id: task.id().number(),
                    name: task.name(),
                    duration: task.duration(),
                    predecessors: names(task.predecessors()),
                    successors: names(task.successors()),
                    early_start: s.early_start,
                    early_finish: s.early_finish,
                    late_start: s.late_start,
                    late_finish: s.late_finish,
                    total_float: s.total_float,
                    free_float: s.free_float,
                    level: s.level,
                    critical: s.is_critical(),
                }
            })
            .collect();

        Self {
            project_finish: schedule.project_finish,
            critical_path: names(&schedule.critical_path),
            levels: schedule.levels.iter().map(|ids| names(ids)).collect(),
            tasks,
        }
    }
}

/// Pretty-printed JSON renderer
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, schedule: &Schedule) -> Result<String, RenderError> {
        let report = JsonReport::new(plan, schedule);
        let mut json =
            serde_json::to_string_pretty(&report).map_err(|e| RenderError::Format(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}
