//! CPM Correctness Test Suite
//!
//! These tests validate fundamental CPM invariants that must hold
//! for ANY valid plan.
//!
//! Invariants:
//! 1. Float is always non-negative
//! 2. EF = ES + duration, LS = LF - duration
//! 3. ES(succ) >= EF(pred) on every edge
//! 4. Sinks are anchored to their own early finish (or the project finish)
//! 5. Critical path is exactly the zero-float tasks, ordered by level
//! 6. Levels strictly increase along every edge

use critpath_core::{Plan, Schedule, Scheduler};
use critpath_solver::{CpmSolver, SinkAnchor};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::Index;

fn build(tasks: &[(&str, i64, &[&str])]) -> (Plan, Schedule) {
    let mut plan = Plan::new();
    for (name, duration, preds) in tasks {
        plan.add_task(name, *duration, preds)
            .unwrap_or_else(|e| panic!("failed to add {}: {}", name, e));
    }
    let schedule = CpmSolver::new().schedule(&plan).expect("Should schedule");
    (plan, schedule)
}

fn times(plan: &Plan, schedule: &Schedule, name: &str) -> (i64, i64, i64, i64) {
    let t = schedule.task(plan.find_task(name).unwrap().id());
    (t.early_start, t.early_finish, t.late_start, t.late_finish)
}

fn float(plan: &Plan, schedule: &Schedule, name: &str) -> i64 {
    schedule.task(plan.find_task(name).unwrap().id()).total_float
}

fn critical_names(plan: &Plan, schedule: &Schedule) -> Vec<String> {
    schedule
        .critical_path
        .iter()
        .map(|&id| plan.task(id).name().to_string())
        .collect()
}

fn complex_network() -> (Plan, Schedule) {
    build(&[
        ("start", 1, &[]),
        ("a", 5, &["start"]),
        ("b", 8, &["start"]),
        ("c", 3, &["a"]),
        ("d", 4, &["b"]),
        ("e", 6, &["c", "d"]),
        ("f", 2, &["a"]),
        ("g", 1, &[]),
        ("end", 1, &["e", "f"]),
    ])
}

fn assert_invariants(plan: &Plan, schedule: &Schedule, anchor: SinkAnchor) {
    for task in plan.tasks() {
        let s = schedule.task(task.id());
        assert!(s.early_start >= 0, "negative ES for {}", task.name());
        assert!(s.late_finish <= schedule.project_finish, "LF past finish for {}", task.name());
        assert_eq!(s.early_finish, s.early_start + task.duration(), "EF for {}", task.name());
        assert_eq!(s.late_start, s.late_finish - task.duration(), "LS for {}", task.name());
        assert!(s.total_float >= 0, "Task {} has negative float", task.name());
        assert!(s.free_float >= 0, "Task {} has negative free float", task.name());
        assert!(s.free_float <= s.total_float, "FF > TF for {}", task.name());
        if task.is_sink() {
            let expected = match anchor {
                SinkAnchor::OwnFinish => s.early_finish,
                SinkAnchor::ProjectFinish => schedule.project_finish,
            };
            assert_eq!(s.late_finish, expected, "sink {} not anchored", task.name());
        }
        if task.is_source() {
            assert_eq!(s.early_start, 0, "source {} does not start at 0", task.name());
            assert_eq!(s.level, 0, "source {} not on level 0", task.name());
        }
    }

    for edge in plan.edges() {
        let pred = schedule.task(edge.from);
        let succ = schedule.task(edge.to);
        assert!(succ.early_start >= pred.early_finish);
        assert!(succ.level > pred.level);
    }

    for &id in &schedule.critical_path {
        assert_eq!(schedule.task(id).total_float, 0);
    }
    let critical_count = schedule.tasks.iter().filter(|t| t.total_float == 0).count();
    assert_eq!(schedule.critical_path.len(), critical_count);
    assert!(schedule
        .critical_path
        .windows(2)
        .all(|w| schedule.task(w[0]).level <= schedule.task(w[1]).level));
}

// ============================================================================
// Example scenarios
// ============================================================================

#[test]
fn fan_in_example() {
    let (plan, schedule) = build(&[
        ("A", 3, &[]),
        ("B", 2, &["A"]),
        ("C", 4, &["A"]),
        ("D", 1, &["B", "C"]),
    ]);

    assert_eq!(times(&plan, &schedule, "A"), (0, 3, 0, 3));
    assert_eq!(times(&plan, &schedule, "B"), (3, 5, 5, 7));
    assert_eq!(times(&plan, &schedule, "C"), (3, 7, 3, 7));
    assert_eq!(times(&plan, &schedule, "D"), (7, 8, 7, 8));

    assert_eq!(float(&plan, &schedule, "B"), 2);
    assert_eq!(float(&plan, &schedule, "C"), 0);
    assert_eq!(critical_names(&plan, &schedule), vec!["A", "C", "D"]);
    assert_eq!(schedule.project_finish, 8);
}

#[test]
fn diamond_with_equal_branches_is_fully_critical() {
    let (plan, schedule) = build(&[
        ("A", 2, &[]),
        ("B", 3, &["A"]),
        ("C", 3, &["A"]),
        ("D", 1, &["B", "C"]),
    ]);

    assert_eq!(float(&plan, &schedule, "B"), 0);
    assert_eq!(float(&plan, &schedule, "C"), 0);
    assert_eq!(critical_names(&plan, &schedule), vec!["A", "B", "C", "D"]);
}

#[test]
fn diamond_with_unequal_branches_keeps_longer_one() {
    let (plan, schedule) = build(&[
        ("A", 2, &[]),
        ("B", 5, &["A"]),
        ("C", 3, &["A"]),
        ("D", 1, &["B", "C"]),
    ]);

    assert_eq!(float(&plan, &schedule, "B"), 0);
    assert_eq!(float(&plan, &schedule, "C"), 2);
    assert_eq!(critical_names(&plan, &schedule), vec!["A", "B", "D"]);
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn invariants_hold_on_complex_network() {
    let (plan, schedule) = complex_network();
    assert_invariants(&plan, &schedule, SinkAnchor::OwnFinish);
}

#[test]
fn complex_network_values() {
    let (plan, schedule) = complex_network();

    // start -> b -> d -> e -> end is the longest chain: 1 + 8 + 4 + 6 + 1
    assert_eq!(schedule.project_finish, 20);
    assert_eq!(
        critical_names(&plan, &schedule),
        vec!["start", "g", "b", "d", "e", "end"]
    );
    // a -> c reaches e at 9, four units before d does
    assert_eq!(float(&plan, &schedule, "a"), 4);
    assert_eq!(float(&plan, &schedule, "c"), 4);
    // f only has to finish before end starts: LF = 19, EF = 8
    assert_eq!(float(&plan, &schedule, "f"), 11);
}

#[test]
fn isolated_sink_is_critical_under_own_finish_anchor() {
    // A lone task is its own source and sink; with per-sink anchoring it
    // always has zero float.
    let (plan, schedule) = complex_network();
    assert_eq!(float(&plan, &schedule, "g"), 0);
    assert_eq!(times(&plan, &schedule, "g"), (0, 1, 0, 1));
}

#[test]
fn project_finish_anchor_gives_short_sinks_float() {
    let mut plan = Plan::new();
    plan.add_task("a", 2, &[]).unwrap();
    plan.add_task("long", 10, &["a"]).unwrap();
    plan.add_task("short", 1, &["a"]).unwrap();

    let own = CpmSolver::new().schedule(&plan).unwrap();
    let project = CpmSolver::new()
        .with_anchor(SinkAnchor::ProjectFinish)
        .schedule(&plan)
        .unwrap();

    let short = plan.find_task("short").unwrap().id();
    assert_eq!(own.task(short).total_float, 0);
    assert_eq!(project.task(short).total_float, 9);
    assert_eq!(project.task(short).late_finish, project.project_finish);
    assert_eq!(critical_names(&plan, &project), vec!["a", "long"]);
}

#[test]
fn levels_are_grouped_with_counts() {
    let (plan, schedule) = build(&[
        ("A", 3, &[]),
        ("B", 2, &["A"]),
        ("C", 4, &["A"]),
        ("D", 1, &["B", "C"]),
    ]);

    assert_eq!(schedule.max_level(), Some(2));
    assert_eq!(schedule.level_counts(), vec![1, 2, 1]);
    let level_one: Vec<&str> = schedule
        .tasks_at_level(1)
        .iter()
        .map(|&id| plan.task(id).name())
        .collect();
    assert_eq!(level_one, vec!["B", "C"]);
}

#[test]
fn rebuilding_yields_identical_schedule() {
    let (plan, first) = complex_network();
    let second = CpmSolver::new().schedule(&plan).unwrap();
    assert_eq!(first, second);
}

#[test]
fn wide_fan_out_and_fan_in() {
    let mut plan = Plan::new();
    plan.add_task("root", 1, &[]).unwrap();
    let mut branches = Vec::new();
    for i in 1..=50 {
        let name = format!("w{}", i);
        plan.add_task(&name, i, &["root"]).unwrap();
        branches.push(name);
    }
    let refs: Vec<&str> = branches.iter().map(String::as_str).collect();
    plan.add_task("join", 1, &refs).unwrap();

    let schedule = CpmSolver::new().schedule(&plan).unwrap();
    assert_invariants(&plan, &schedule, SinkAnchor::OwnFinish);
    assert_eq!(schedule.project_finish, 1 + 50 + 1);
    assert_eq!(critical_names(&plan, &schedule), vec!["root", "w50", "join"]);
    assert_eq!(float(&plan, &schedule, "w1"), 49);
}

// ============================================================================
// Generated plans
// ============================================================================

/// One row per task: a duration and picks among the tasks added before it
fn arb_rows() -> impl Strategy<Value = Vec<(i64, Vec<Index>)>> {
    prop::collection::vec(
        (1i64..10, prop::collection::vec(any::<Index>(), 0..4)),
        1..60,
    )
}

fn generated_plan(rows: &[(i64, Vec<Index>)]) -> Plan {
    let mut plan = Plan::new();
    for (i, (duration, picks)) in rows.iter().enumerate() {
        let preds: Vec<String> = if i == 0 {
            Vec::new()
        } else {
            picks.iter().map(|pick| format!("t{}", pick.index(i))).collect()
        };
        let refs: Vec<&str> = preds.iter().map(String::as_str).collect();
        plan.add_task(&format!("t{}", i), *duration, &refs).unwrap();
    }
    plan
}

fn arb_anchor() -> impl Strategy<Value = SinkAnchor> {
    prop_oneof![Just(SinkAnchor::OwnFinish), Just(SinkAnchor::ProjectFinish)]
}

proptest! {
    #[test]
    fn invariants_hold_on_generated_plans(rows in arb_rows(), anchor in arb_anchor()) {
        let plan = generated_plan(&rows);
        let solver = CpmSolver::new().with_anchor(anchor);
        let schedule = solver.schedule(&plan).unwrap();

        assert_invariants(&plan, &schedule, anchor);
        prop_assert_eq!(schedule.tasks.len(), plan.len());
        prop_assert_eq!(
            schedule.levels.iter().map(Vec::len).sum::<usize>(),
            plan.len()
        );
        // At least one chain reaching the project finish is critical
        prop_assert!(!schedule.critical_path.is_empty());
        prop_assert_eq!(solver.schedule(&plan).unwrap(), schedule);
    }
}
