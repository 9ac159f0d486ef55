use thiserror::Error;

use crate::TaskId;

/// Errors raised by the typed blackboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard type mismatch for key id={id} (stored type differs from requested)")]
    TypeMismatch { id: u64 },
}

/// Task contract violations.
///
/// These are programmer errors: a tree that is assembled and driven correctly never
/// produces one. Ordinary child failure is reported as a status, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task {task} was run without a control")]
    NoControl { task: TaskId },

    #[error("task {task} was run before start")]
    NotStarted { task: TaskId },

    #[error("task {task} was run without a passing guard check")]
    GuardNotChecked { task: TaskId },

    #[error("task {task} was started while still running")]
    AlreadyRunning { task: TaskId },

    #[error("task {task} reported {reported} from run; expected Running, Succeeded or Failed")]
    InvalidReport { task: TaskId, reported: &'static str },

    #[error(transparent)]
    Blackboard(#[from] BlackboardError),
}

pub type Result<T> = std::result::Result<T, TaskError>;
