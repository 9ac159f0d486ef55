use core::fmt;

use btree_core::{Blackboard, Result, TaskError, TaskId, TickContext};

use crate::status::Status;

/// Guard predicate evaluated against the node's control before activation.
pub type Guard = Box<dyn Fn(&TickContext, &Blackboard, TaskId) -> bool>;

/// Behavior of a tree node.
///
/// Implementors only describe what a node does. Lifecycle bookkeeping (status, control,
/// start/guard preconditions) lives in [`TaskNode`], which is what parents own and drive.
pub trait Task: 'static {
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Called once when the node is attached to a tree and given its handle.
    fn bind(&mut self, _id: TaskId) {}

    /// Called on every activation, before the guard and the first `run`.
    fn start(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<()> {
        Ok(())
    }

    /// Step the task once. Must report `Running`, `Succeeded` or `Failed`.
    fn run(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status>;

    /// Stop a running task. Branches cancel their running children here.
    fn cancel(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<()> {
        Ok(())
    }

    /// Runtime reset: clear transient state, keep configuration.
    fn reset_task(&mut self) {}

    /// Pooled reset: clear transient state and restore configuration defaults.
    fn reset(&mut self) {
        self.reset_task();
    }

    fn children(&self) -> &[TaskNode] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [TaskNode] {
        &mut []
    }
}

/// A task plus its lifecycle state inside a tree.
pub struct TaskNode {
    id: TaskId,
    status: Status,
    control: Option<TaskId>,
    started: bool,
    guard_passed: bool,
    guard: Option<Guard>,
    task: Box<dyn Task>,
}

impl TaskNode {
    pub fn new(task: impl Task) -> Self {
        Self::boxed(Box::new(task))
    }

    pub fn boxed(task: Box<dyn Task>) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            status: Status::Fresh,
            control: None,
            started: false,
            guard_passed: false,
            guard: None,
            task,
        }
    }

    pub fn with_guard(
        mut self,
        guard: impl Fn(&TickContext, &Blackboard, TaskId) -> bool + 'static,
    ) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn control(&self) -> Option<TaskId> {
        self.control
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    pub fn name(&self) -> &'static str {
        self.task.name()
    }

    pub fn task(&self) -> &dyn Task {
        self.task.as_ref()
    }

    pub fn children(&self) -> &[TaskNode] {
        self.task.children()
    }

    /// Assign handles in pre-order starting at `*next`; returns the number of nodes visited.
    pub fn assign_ids(&mut self, next: &mut u32) -> u32 {
        self.id = TaskId(*next);
        *next += 1;
        self.task.bind(self.id);

        let mut visited = 1;
        for child in self.task.children_mut() {
            visited += child.assign_ids(next);
        }
        visited
    }

    /// Pre-order lookup of the node with handle `id` in this subtree.
    pub fn find(&self, id: TaskId) -> Option<&TaskNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    pub fn set_control(&mut self, control: TaskId) {
        self.control = Some(control);
    }

    /// Evaluate the guard against `control`. Does not change the status.
    pub fn check_guard(
        &mut self,
        control: TaskId,
        ctx: &TickContext,
        blackboard: &Blackboard,
    ) -> bool {
        let passed = match self.guard.as_ref() {
            Some(guard) => guard(ctx, blackboard, control),
            None => true,
        };
        self.guard_passed = passed;
        passed
    }

    pub fn start(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<()> {
        if self.control.is_none() {
            return Err(self.violation(TaskError::NoControl { task: self.id }));
        }
        if self.status == Status::Running {
            return Err(self.violation(TaskError::AlreadyRunning { task: self.id }));
        }

        self.task.start(ctx, blackboard)?;
        self.started = true;
        self.guard_passed = false;
        Ok(())
    }

    /// Step the task and record its report.
    pub fn run(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status> {
        if self.control.is_none() {
            return Err(self.violation(TaskError::NoControl { task: self.id }));
        }
        if !self.started {
            return Err(self.violation(TaskError::NotStarted { task: self.id }));
        }
        if !self.guard_passed {
            return Err(self.violation(TaskError::GuardNotChecked { task: self.id }));
        }

        let report = self.task.run(ctx, blackboard)?;
        if !report.is_report() {
            return Err(self.violation(TaskError::InvalidReport {
                task: self.id,
                reported: report.as_str(),
            }));
        }

        self.status = report;
        if report.is_finished() {
            self.deactivate();
        }
        Ok(report)
    }

    /// Drive a node that is not running: record the control, start it, then run it if
    /// the guard passes or fail it otherwise.
    pub fn activate(
        &mut self,
        control: TaskId,
        ctx: &TickContext,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.set_control(control);
        self.start(ctx, blackboard)?;
        if self.check_guard(control, ctx, blackboard) {
            self.run(ctx, blackboard)
        } else {
            Ok(self.fail())
        }
    }

    /// Force the node to `Failed` without running it.
    pub fn fail(&mut self) -> Status {
        self.status = Status::Failed;
        self.deactivate();
        Status::Failed
    }

    /// Cancel the node if it is running; otherwise a no-op. Returns whether it was cancelled.
    pub fn cancel(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<bool> {
        if self.status != Status::Running {
            return Ok(false);
        }

        self.task.cancel(ctx, blackboard)?;
        self.status = Status::Cancelled;
        self.deactivate();
        Ok(true)
    }

    /// Back to `Fresh`, keeping the guard and the task's configuration.
    ///
    /// A running task is dropped without its cancel hook; cancel first when the hook matters.
    pub fn reset_task(&mut self) {
        self.task.reset_task();
        self.clear();
    }

    /// Back to `Fresh` with configuration defaults restored and the guard removed.
    pub fn reset(&mut self) {
        self.task.reset();
        self.guard = None;
        self.clear();
    }

    fn clear(&mut self) {
        self.status = Status::Fresh;
        self.control = None;
        self.deactivate();
    }

    fn deactivate(&mut self) {
        self.started = false;
        self.guard_passed = false;
    }

    fn violation(&self, err: TaskError) -> TaskError {
        tracing::warn!(
            task = %self.id,
            name = self.task.name(),
            error = %err,
            "task contract violation"
        );
        err
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("id", &self.id)
            .field("name", &self.task.name())
            .field("status", &self.status)
            .field("control", &self.control)
            .field("children", &self.children().len())
            .finish()
    }
}
