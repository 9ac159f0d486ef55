use btree_core::{Blackboard, Result, TaskId, TickContext};
use btree_tools::{emit as trace_emit, TraceEvent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::task::TaskNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BehaviorTreeConfig {
    /// Runtime-reset the whole tree after the root finishes, so every node reads `Fresh`
    /// between activations. Off by default: finished statuses stay observable until the
    /// next tick re-activates the root.
    pub reset_on_completion: bool,
}

/// Owns an assembled tree and drives its root once per tick.
pub struct BehaviorTree {
    root: TaskNode,
    config: BehaviorTreeConfig,
    last: Status,
    ticks: u64,
    node_count: u32,
}

impl BehaviorTree {
    /// Take ownership of `root` and assign every node its handle (root is `TaskId(1)`).
    pub fn new(mut root: TaskNode) -> Self {
        let mut next = TaskId::TREE.index() + 1;
        let node_count = root.assign_ids(&mut next);
        tracing::debug!(root = root.name(), node_count, "behavior tree assembled");
        Self {
            root,
            config: BehaviorTreeConfig::default(),
            last: Status::Fresh,
            ticks: 0,
            node_count,
        }
    }

    pub fn with_config(mut self, config: BehaviorTreeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &TaskNode {
        &self.root
    }

    pub fn find(&self, id: TaskId) -> Option<&TaskNode> {
        self.root.find(id)
    }

    pub fn last_status(&self) -> Status {
        self.last
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Step the tree once: resume a running root, otherwise activate it afresh.
    pub fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status> {
        let status = if self.root.status() == Status::Running {
            self.root.run(ctx, blackboard)?
        } else {
            self.root.activate(TaskId::TREE, ctx, blackboard)?
        };

        self.last = status;
        self.ticks = self.ticks.saturating_add(1);

        if status.is_finished() {
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.tree.complete")
                    .with_task(self.root.id())
                    .with_a(u64::from(status == Status::Succeeded)),
            )?;
            if self.config.reset_on_completion {
                self.root.reset_task();
            }
        }
        Ok(status)
    }

    /// Cancel the root and everything still running below it.
    pub fn cancel(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<()> {
        if self.root.cancel(ctx, blackboard)? {
            self.last = Status::Cancelled;
        }
        Ok(())
    }

    /// Runtime-reset the whole tree.
    pub fn reset(&mut self) {
        self.root.reset_task();
        self.last = Status::Fresh;
    }
}
