use btree_core::{Blackboard, Result, TickContext};

use crate::status::Status;
use crate::task::Task;

/// Succeeds when the predicate holds, fails otherwise.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F> Task for Condition<F>
where
    F: Fn(&TickContext, &Blackboard) -> bool + 'static,
{
    fn name(&self) -> &'static str {
        "Condition"
    }

    fn run(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Result<Status> {
        if (self.cond)(ctx, &*blackboard) {
            Ok(Status::Succeeded)
        } else {
            Ok(Status::Failed)
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Succeed;

impl Task for Succeed {
    fn name(&self) -> &'static str {
        "Succeed"
    }

    fn run(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<Status> {
        Ok(Status::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Fail;

impl Task for Fail {
    fn name(&self) -> &'static str {
        "Fail"
    }

    fn run(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<Status> {
        Ok(Status::Failed)
    }
}

/// Reports `Running` for `ticks` steps after each start, then succeeds.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    ticks: u32,
    remaining: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self {
            ticks,
            remaining: ticks,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Task for Wait {
    fn name(&self) -> &'static str {
        "Wait"
    }

    fn start(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<()> {
        self.remaining = self.ticks;
        Ok(())
    }

    fn run(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<Status> {
        if self.remaining == 0 {
            return Ok(Status::Succeeded);
        }
        self.remaining -= 1;
        Ok(Status::Running)
    }

    fn cancel(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> Result<()> {
        self.remaining = 0;
        Ok(())
    }

    fn reset_task(&mut self) {
        self.remaining = self.ticks;
    }
}
