mod common;

use btree::{BehaviorTree, Blackboard, Orchestrator, Parallel, Policy, Status, TaskNode};
use common::{ctx, leaf, runs};
use proptest::prelude::*;

const NAMES: [&str; 8] = ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"];

fn outcome(success: bool) -> Status {
    if success {
        Status::Succeeded
    } else {
        Status::Failed
    }
}

fn immediate(outcomes: &[bool]) -> Vec<TaskNode> {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, &ok)| leaf(NAMES[i], &[outcome(ok)]))
        .collect()
}

fn tree(policy: Policy, orchestrator: Orchestrator, children: Vec<TaskNode>) -> BehaviorTree {
    BehaviorTree::new(TaskNode::new(
        Parallel::new(children)
            .with_policy(policy)
            .with_orchestrator(orchestrator),
    ))
}

proptest! {
    #[test]
    fn sequence_resume_succeeds_iff_every_child_succeeds(
        outcomes in prop::collection::vec(any::<bool>(), 0..8)
    ) {
        let mut bb = Blackboard::new();
        let mut tree = tree(Policy::Sequence, Orchestrator::Resume, immediate(&outcomes));

        let status = tree.tick(&ctx(0), &mut bb).unwrap();
        let first_failure = outcomes.iter().position(|ok| !ok);

        match first_failure {
            None => {
                prop_assert_eq!(status, Status::Succeeded);
                prop_assert_eq!(runs(&bb).len(), outcomes.len());
            }
            Some(index) => {
                prop_assert_eq!(status, Status::Failed);
                prop_assert_eq!(runs(&bb), NAMES[..=index].to_vec());
            }
        }
    }

    #[test]
    fn selector_resume_fails_iff_every_child_fails(
        outcomes in prop::collection::vec(any::<bool>(), 0..8)
    ) {
        let mut bb = Blackboard::new();
        let mut tree = tree(Policy::Selector, Orchestrator::Resume, immediate(&outcomes));

        let status = tree.tick(&ctx(0), &mut bb).unwrap();
        let first_success = outcomes.iter().position(|ok| *ok);

        match first_success {
            None => {
                prop_assert_eq!(status, Status::Failed);
                prop_assert_eq!(runs(&bb).len(), outcomes.len());
            }
            Some(index) => {
                prop_assert_eq!(status, Status::Succeeded);
                prop_assert_eq!(runs(&bb), NAMES[..=index].to_vec());
            }
        }
    }

    #[test]
    fn join_runs_each_child_to_an_outcome_at_most_once(
        children in prop::collection::vec((0u8..3, any::<bool>()), 1..6),
        selector in any::<bool>(),
    ) {
        let policy = if selector { Policy::Selector } else { Policy::Sequence };
        let nodes = children
            .iter()
            .enumerate()
            .map(|(i, &(delay, ok))| {
                let mut script = vec![Status::Running; delay as usize];
                script.push(outcome(ok));
                leaf(NAMES[i], &script)
            })
            .collect();

        let mut bb = Blackboard::new();
        let mut tree = tree(policy, Orchestrator::Join, nodes);

        let max_delay = children.iter().map(|&(d, _)| d as u64).max().unwrap_or(0);
        let mut status = Status::Running;
        let mut tick = 0;
        while status == Status::Running && tick <= max_delay {
            status = tree.tick(&ctx(tick), &mut bb).unwrap();
            tick += 1;
        }

        let expected = match policy {
            Policy::Sequence => outcome(children.iter().all(|&(_, ok)| ok)),
            Policy::Selector => outcome(children.iter().any(|&(_, ok)| ok)),
        };
        prop_assert_eq!(status, expected);

        let log = runs(&bb);
        for (i, &(delay, _)) in children.iter().enumerate() {
            let count = log.iter().filter(|name| **name == NAMES[i]).count();
            prop_assert!(count <= delay as usize + 1, "{} ran {} times", NAMES[i], count);
        }

        for child in tree.root().children() {
            prop_assert_eq!(child.status(), Status::Fresh);
        }
    }

    #[test]
    fn a_verdict_never_leaves_a_child_running(
        scripts in prop::collection::vec(0u8..3, 1..6),
        selector in any::<bool>(),
        join in any::<bool>(),
    ) {
        // 0 = runs forever, 1 = succeeds, 2 = fails
        let policy = if selector { Policy::Selector } else { Policy::Sequence };
        let orchestrator = if join { Orchestrator::Join } else { Orchestrator::Resume };
        let nodes = scripts
            .iter()
            .enumerate()
            .map(|(i, &kind)| match kind {
                0 => leaf(NAMES[i], &[Status::Running]),
                1 => leaf(NAMES[i], &[Status::Succeeded]),
                _ => leaf(NAMES[i], &[Status::Failed]),
            })
            .collect();

        let mut bb = Blackboard::new();
        let mut tree = tree(policy, orchestrator, nodes);

        for tick in 0..3 {
            let status = tree.tick(&ctx(tick), &mut bb).unwrap();
            if status != Status::Running {
                for child in tree.root().children() {
                    prop_assert_ne!(child.status(), Status::Running);
                }
            }
        }
    }
}
