//! Behavior tree runtime built on `btree-core`, centred on the [`Parallel`] composite.
//!
//! A tree is a [`TaskNode`] hierarchy owned top-down by a [`BehaviorTree`]. Each node pairs
//! a [`Task`] (what it does) with lifecycle state (status, control handle, guard). A step
//! report returned from [`TaskNode::run`] is how a child notifies its control.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod branch;
pub mod leaf;
pub mod orchestrator;
pub mod parallel;
pub mod policy;
pub mod status;
pub mod task;
pub mod tree;

pub use branch::BranchTask;
pub use btree_core::{BbKey, Blackboard, Result, TaskError, TaskId, TickContext};
pub use leaf::{Condition, Fail, Succeed, Wait};
pub use orchestrator::Orchestrator;
pub use parallel::{Parallel, ParallelConfig};
pub use policy::{Policy, Verdict};
pub use status::Status;
pub use task::{Guard, Task, TaskNode};
pub use tree::{BehaviorTree, BehaviorTreeConfig};
