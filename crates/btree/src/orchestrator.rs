use btree_core::{Blackboard, Result, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::parallel::Parallel;
use crate::status::Status;

/// Which children a [`Parallel`] node drives on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orchestrator {
    /// Start or resume every child on every tick.
    #[default]
    Resume,
    /// Run each child to an outcome at most once per activation; finished children are
    /// skipped until the parallel node resolves, then every child is reset.
    Join,
}

impl Orchestrator {
    /// Whether children that already succeeded or failed are skipped on later ticks.
    pub fn skips_finished_children(self) -> bool {
        matches!(self, Orchestrator::Join)
    }

    /// Whether every child is reset once the parallel node resolves.
    pub fn resets_children_on_verdict(self) -> bool {
        matches!(self, Orchestrator::Join)
    }

    /// One pass over the children of `parallel`.
    pub fn execute(
        self,
        parallel: &mut Parallel,
        ctx: &TickContext,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        parallel.begin_pass();

        if parallel.child_count() == 0 {
            let verdict = parallel.policy().on_no_children();
            parallel.decide(verdict);
            return parallel.conclude(ctx, blackboard);
        }

        let control = parallel.id();
        for index in 0..parallel.child_count() {
            parallel.set_current_child(index);
            let Some(child) = parallel.branch_mut().child_mut(index) else {
                break;
            };

            let report = match child.status() {
                Status::Running => Some(child.run(ctx, blackboard)?),
                Status::Succeeded | Status::Failed if self.skips_finished_children() => None,
                _ => Some(child.activate(control, ctx, blackboard)?),
            };

            if let Some(report) = report {
                tracing::trace!(task = %control, child = index, ?report, "parallel child stepped");
                parallel.report(report);
            }

            if parallel.last_result().is_decided() {
                return parallel.conclude(ctx, blackboard);
            }
        }

        Ok(Status::Running)
    }
}
