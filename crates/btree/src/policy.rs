#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::orchestrator::Orchestrator;
use crate::parallel::Parallel;
use crate::status::Status;

/// Per-pass decision of a [`Parallel`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    /// Undecided: keep running.
    #[default]
    Running,
    Succeed,
    Fail,
}

impl Verdict {
    pub fn is_decided(self) -> bool {
        self != Verdict::Running
    }

    /// Status the parallel node reports for this verdict.
    pub fn status(self) -> Status {
        match self {
            Verdict::Running => Status::Running,
            Verdict::Succeed => Status::Succeeded,
            Verdict::Fail => Status::Failed,
        }
    }
}

/// How child outcomes combine into the outcome of a [`Parallel`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Policy {
    /// Fail as soon as one child fails; succeed once every child has succeeded.
    #[default]
    Sequence,
    /// Succeed as soon as one child succeeds; fail once every child has failed.
    Selector,
}

impl Policy {
    /// Verdict after a child reported `Succeeded`.
    pub fn on_child_success(self, parallel: &Parallel) -> Verdict {
        match self {
            Policy::Sequence if pass_complete(parallel, Status::Succeeded) => Verdict::Succeed,
            Policy::Sequence => Verdict::Running,
            Policy::Selector => Verdict::Succeed,
        }
    }

    /// Verdict after a child reported `Failed`.
    pub fn on_child_fail(self, parallel: &Parallel) -> Verdict {
        match self {
            Policy::Sequence => Verdict::Fail,
            Policy::Selector if pass_complete(parallel, Status::Failed) => Verdict::Fail,
            Policy::Selector => Verdict::Running,
        }
    }

    /// Verdict of a parallel node without children.
    pub fn on_no_children(self) -> Verdict {
        match self {
            Policy::Sequence => Verdict::Succeed,
            Policy::Selector => Verdict::Fail,
        }
    }
}

// No child is left running and the group has been covered: under Resume the last child
// was just evaluated, under Join every child is locked on `outcome`.
fn pass_complete(parallel: &Parallel, outcome: Status) -> bool {
    if !parallel.no_running_tasks() {
        return false;
    }

    match parallel.orchestrator() {
        Orchestrator::Resume => parallel.current_child_index() + 1 == parallel.child_count(),
        Orchestrator::Join => parallel.children().iter().all(|c| c.status() == outcome),
    }
}
