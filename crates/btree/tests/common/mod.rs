#![allow(dead_code)]

use btree::{BbKey, Blackboard, Result, Status, Task, TaskNode, TickContext};

/// Every `run` of a scripted leaf, in order.
pub const RUNS: BbKey<Vec<&'static str>> = BbKey::new(1);
/// Every cancellation of a scripted leaf, in order.
pub const CANCELS: BbKey<Vec<&'static str>> = BbKey::new(2);

/// Leaf whose n-th `run` reports `script[n]`; the last entry repeats forever.
pub struct Scripted {
    name: &'static str,
    script: Vec<Status>,
    cursor: usize,
}

impl Scripted {
    pub fn new(name: &'static str, script: &[Status]) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        Self {
            name,
            script: script.to_vec(),
            cursor: 0,
        }
    }
}

impl Task for Scripted {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status> {
        blackboard.get_or_insert_with(RUNS, Vec::new)?.push(self.name);
        let report = self.script[self.cursor.min(self.script.len() - 1)];
        self.cursor += 1;
        Ok(report)
    }

    fn cancel(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> Result<()> {
        blackboard.get_or_insert_with(CANCELS, Vec::new)?.push(self.name);
        Ok(())
    }

    fn reset_task(&mut self) {
        self.cursor = 0;
    }
}

pub fn leaf(name: &'static str, script: &[Status]) -> TaskNode {
    TaskNode::new(Scripted::new(name, script))
}

pub fn succeeds(name: &'static str) -> TaskNode {
    leaf(name, &[Status::Succeeded])
}

pub fn fails(name: &'static str) -> TaskNode {
    leaf(name, &[Status::Failed])
}

pub fn runs_forever(name: &'static str) -> TaskNode {
    leaf(name, &[Status::Running])
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

pub fn runs(bb: &Blackboard) -> Vec<&'static str> {
    bb.get(RUNS).unwrap().cloned().unwrap_or_default()
}

pub fn cancels(bb: &Blackboard) -> Vec<&'static str> {
    bb.get(CANCELS).unwrap().cloned().unwrap_or_default()
}

pub fn statuses(node: &TaskNode) -> Vec<Status> {
    node.children().iter().map(|c| c.status()).collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
