use btree_core::{Blackboard, Result, TaskId, TickContext};
use btree_tools::{emit as trace_emit, TraceEvent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::branch::BranchTask;
use crate::orchestrator::Orchestrator;
use crate::policy::{Policy, Verdict};
use crate::status::Status;
use crate::task::{Task, TaskNode};

/// Configuration of a [`Parallel`] node, as an authoring layer would load it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParallelConfig {
    pub policy: Policy,
    pub orchestrator: Orchestrator,
}

/// Composite that activates all of its children within one tick.
///
/// The [`Orchestrator`] decides which children are driven on each tick; the [`Policy`]
/// turns each child outcome into a [`Verdict`]. The first decided verdict in child order
/// ends the pass: children still running are cancelled and the node reports the verdict.
///
/// Defaults are [`Policy::Sequence`] and [`Orchestrator::Resume`].
#[derive(Debug)]
pub struct Parallel {
    branch: BranchTask,
    policy: Policy,
    orchestrator: Orchestrator,

    no_running_tasks: bool,
    last_result: Verdict,
    current_child_index: usize,
}

impl Parallel {
    pub fn new(children: Vec<TaskNode>) -> Self {
        Self::from_config(ParallelConfig::default(), children)
    }

    pub fn from_config(config: ParallelConfig, children: Vec<TaskNode>) -> Self {
        Self {
            branch: BranchTask::new(children),
            policy: config.policy,
            orchestrator: config.orchestrator,
            no_running_tasks: true,
            last_result: Verdict::Running,
            current_child_index: 0,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_orchestrator(mut self, orchestrator: Orchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn with_config(self, config: ParallelConfig) -> Self {
        self.with_policy(config.policy)
            .with_orchestrator(config.orchestrator)
    }

    pub fn with_child(mut self, child: TaskNode) -> Self {
        self.branch.add_child(child);
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn orchestrator(&self) -> Orchestrator {
        self.orchestrator
    }

    pub fn config(&self) -> ParallelConfig {
        ParallelConfig {
            policy: self.policy,
            orchestrator: self.orchestrator,
        }
    }

    pub fn id(&self) -> TaskId {
        self.branch.id()
    }

    /// True while no child has reported `Running` in the current pass.
    pub fn no_running_tasks(&self) -> bool {
        self.no_running_tasks
    }

    /// Verdict of the latest pass; `Running` when undecided.
    pub fn last_result(&self) -> Verdict {
        self.last_result
    }

    /// Index of the child evaluated last in the current pass.
    pub fn current_child_index(&self) -> usize {
        self.current_child_index
    }

    pub fn child_count(&self) -> usize {
        self.branch.child_count()
    }

    pub fn child(&self, index: usize) -> Option<&TaskNode> {
        self.branch.child(index)
    }

    pub fn children(&self) -> &[TaskNode] {
        self.branch.children()
    }

    pub fn child_running(&mut self) {
        self.no_running_tasks = false;
    }

    pub fn child_success(&mut self) {
        self.last_result = self.policy.on_child_success(self);
    }

    pub fn child_fail(&mut self) {
        self.last_result = self.policy.on_child_fail(self);
    }

    /// Runtime-reset every child, including the ones that already finished.
    pub fn reset_all_children(&mut self) {
        self.branch.reset_children_task();
    }

    pub(crate) fn begin_pass(&mut self) {
        self.no_running_tasks = true;
        self.last_result = Verdict::Running;
        self.current_child_index = 0;
    }

    pub(crate) fn set_current_child(&mut self, index: usize) {
        self.current_child_index = index;
    }

    pub(crate) fn decide(&mut self, verdict: Verdict) {
        self.last_result = verdict;
    }

    pub(crate) fn branch_mut(&mut self) -> &mut BranchTask {
        &mut self.branch
    }

    /// Dispatch one child report to the matching notification.
    pub(crate) fn report(&mut self, status: Status) {
        match status {
            Status::Running => self.child_running(),
            Status::Succeeded => self.child_success(),
            Status::Failed => self.child_fail(),
            Status::Fresh | Status::Cancelled => {}
        }
    }

    /// Apply a decided verdict: cancel what is still running, let the orchestrator
    /// clean up, and report the verdict as this node's status.
    pub(crate) fn conclude(
        &mut self,
        ctx: &TickContext,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        let (tag, status) = match self.last_result {
            Verdict::Succeed => ("bt.parallel.success", Status::Succeeded),
            Verdict::Fail => ("bt.parallel.fail", Status::Failed),
            Verdict::Running => return Ok(Status::Running),
        };
        let start = if self.no_running_tasks {
            self.current_child_index + 1
        } else {
            0
        };

        let cancelled = self.branch.cancel_running_children(start, ctx, blackboard)?;
        if cancelled > 0 {
            tracing::debug!(
                task = %self.id(),
                start,
                cancelled,
                "parallel cancelled running children"
            );
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.parallel.cancel")
                    .with_task(self.id())
                    .with_a(start as u64)
                    .with_b(cancelled as u64),
            )?;
        }

        if self.orchestrator.resets_children_on_verdict() {
            self.reset_all_children();
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.parallel.reset_children")
                    .with_task(self.id())
                    .with_a(self.child_count() as u64),
            )?;
        }

        tracing::debug!(
            task = %self.id(),
            verdict = ?self.last_result,
            policy = ?self.policy,
            orchestrator = ?self.orchestrator,
            child = self.current_child_index,
            "parallel resolved"
        );
        trace_emit(
            blackboard,
            TraceEvent::new(ctx.tick, tag)
                .with_task(self.id())
                .with_a(self.current_child_index as u64),
        )?;

        Ok(status)
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Task for Parallel {
    fn name(&self) -> &'static str {
        "Parallel"
    }

    fn bind(&mut self, id: TaskId) {
        self.branch.bind(id);
    }

    fn start(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<()> {
        // Outcomes locked in by a cancelled Join belong to the previous activation.
        if self.orchestrator.skips_finished_children() {
            self.branch.reset_children_task();
        }
        Ok(())
    }

    fn run(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status> {
        self.orchestrator.execute(self, ctx, blackboard)
    }

    fn cancel(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<()> {
        self.branch.cancel_running_children(0, ctx, blackboard)?;
        Ok(())
    }

    fn reset_task(&mut self) {
        self.begin_pass();
        self.branch.reset_children_task();
    }

    fn reset(&mut self) {
        self.policy = Policy::Sequence;
        self.orchestrator = Orchestrator::Resume;
        self.begin_pass();
        self.branch.reset_children();
    }

    fn children(&self) -> &[TaskNode] {
        self.branch.children()
    }

    fn children_mut(&mut self) -> &mut [TaskNode] {
        self.branch.children_mut()
    }
}
