use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Non-owning handle to a node of an assembled tree.
///
/// Handles are assigned in pre-order when a tree is built. A child refers to its
/// control (the parent branch, or the tree itself for the root) only through this
/// handle, so ownership in the tree stays strictly top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskId(pub u32);

impl TaskId {
    /// The tree itself; the control of every root task.
    pub const TREE: TaskId = TaskId(0);

    /// A node that has not been attached to a tree yet.
    pub const UNASSIGNED: TaskId = TaskId(u32::MAX);

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TREE => f.write_str("tree"),
            Self::UNASSIGNED => f.write_str("unassigned"),
            TaskId(id) => write!(f, "#{id}"),
        }
    }
}
