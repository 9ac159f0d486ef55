#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Never run, or reset since the last activation.
    #[default]
    Fresh,
    Running,
    Succeeded,
    Failed,
    /// Stopped by its control while running; produced no outcome.
    Cancelled,
}

impl Status {
    /// `Succeeded` or `Failed`: the task produced an outcome.
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Succeeded | Status::Failed)
    }

    /// Finished or cancelled.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Succeeded | Status::Failed | Status::Cancelled)
    }

    /// Whether a task may report this status from a single step.
    pub fn is_report(self) -> bool {
        matches!(self, Status::Running | Status::Succeeded | Status::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Fresh => "Fresh",
            Status::Running => "Running",
            Status::Succeeded => "Succeeded",
            Status::Failed => "Failed",
            Status::Cancelled => "Cancelled",
        }
    }
}
