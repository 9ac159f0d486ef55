mod common;

use btree::{
    BehaviorTree, Blackboard, Orchestrator, Parallel, ParallelConfig, Policy, Status, Task,
    TaskNode, Verdict,
};
use common::{ctx, fails, runs, runs_forever, succeeds};

#[test]
fn reset_restores_default_configuration_and_clears_the_verdict() {
    let mut bb = Blackboard::new();
    let mut parallel = Parallel::new(vec![succeeds("a")])
        .with_policy(Policy::Selector)
        .with_orchestrator(Orchestrator::Join);

    assert_eq!(parallel.run(&ctx(0), &mut bb).unwrap(), Status::Succeeded);
    assert_eq!(parallel.last_result(), Verdict::Succeed);

    parallel.reset();

    assert_eq!(parallel.policy(), Policy::Sequence);
    assert_eq!(parallel.orchestrator(), Orchestrator::Resume);
    assert_eq!(parallel.config(), ParallelConfig::default());
    assert_eq!(parallel.last_result(), Verdict::Running);
    assert!(parallel.no_running_tasks());
    assert_eq!(parallel.current_child_index(), 0);
}

#[test]
fn reset_recursively_returns_children_to_fresh() {
    let mut bb = Blackboard::new();
    let mut parallel = Parallel::new(vec![runs_forever("a"), fails("b")])
        .with_policy(Policy::Selector);

    assert_eq!(parallel.run(&ctx(0), &mut bb).unwrap(), Status::Running);
    assert!(!parallel.no_running_tasks());
    assert_eq!(parallel.child(0).unwrap().status(), Status::Running);
    assert_eq!(parallel.child(1).unwrap().status(), Status::Failed);

    parallel.reset();

    for child in parallel.children() {
        assert_eq!(child.status(), Status::Fresh);
        assert_eq!(child.control(), None);
    }
}

#[test]
fn reset_removes_guards_but_reset_task_keeps_them() {
    let mut parallel = Parallel::new(vec![succeeds("a").with_guard(|_, _, _| false)])
        .with_policy(Policy::Selector);

    parallel.reset_task();
    assert!(parallel.child(0).unwrap().has_guard());
    assert_eq!(parallel.policy(), Policy::Selector);

    parallel.reset();
    assert!(!parallel.child(0).unwrap().has_guard());
    assert_eq!(parallel.policy(), Policy::Sequence);
}

#[test]
fn reset_task_keeps_configuration() {
    let mut bb = Blackboard::new();
    let config = ParallelConfig {
        policy: Policy::Selector,
        orchestrator: Orchestrator::Join,
    };
    let mut parallel = Parallel::from_config(config, vec![runs_forever("a"), fails("b")]);

    assert_eq!(parallel.run(&ctx(0), &mut bb).unwrap(), Status::Running);
    parallel.reset_task();

    assert_eq!(parallel.config(), config);
    assert!(parallel
        .children()
        .iter()
        .all(|c| c.status() == Status::Fresh));
}

#[test]
fn join_reset_does_not_erase_nested_configuration() {
    let mut bb = Blackboard::new();
    let inner = Parallel::new(vec![fails("x"), succeeds("y")]).with_policy(Policy::Selector);
    let outer = Parallel::new(vec![TaskNode::new(inner)]).with_orchestrator(Orchestrator::Join);
    let mut tree = BehaviorTree::new(TaskNode::new(outer));

    assert_eq!(tree.tick(&ctx(0), &mut bb).unwrap(), Status::Succeeded);
    // Still a selector after the outer join reset its children.
    assert_eq!(tree.tick(&ctx(1), &mut bb).unwrap(), Status::Succeeded);
    assert_eq!(runs(&bb), vec!["x", "y", "x", "y"]);
}

#[test]
fn tree_reset_returns_every_node_to_fresh() {
    let mut bb = Blackboard::new();
    let mut tree = BehaviorTree::new(TaskNode::new(Parallel::new(vec![
        runs_forever("a"),
        succeeds("b"),
    ])));

    assert_eq!(tree.tick(&ctx(0), &mut bb).unwrap(), Status::Running);
    tree.reset();

    assert_eq!(tree.last_status(), Status::Fresh);
    assert_eq!(tree.root().status(), Status::Fresh);
    assert!(tree
        .root()
        .children()
        .iter()
        .all(|c| c.status() == Status::Fresh));
}
