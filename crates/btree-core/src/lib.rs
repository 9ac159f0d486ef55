//! Deterministic kernel primitives shared by the behavior tree crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod error;
pub mod id;
pub mod tick;

pub use blackboard::{BbKey, Blackboard};
pub use error::{BlackboardError, Result, TaskError};
pub use id::TaskId;
pub use tick::TickContext;
