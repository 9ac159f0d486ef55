use btree_core::{Blackboard, Result, TaskId, TickContext};

use crate::task::TaskNode;

/// Ordered children of a composite task.
///
/// Insertion order is execution order and tie-break order. Children can only be added
/// while the tree is being assembled: once a [`BehaviorTree`](crate::BehaviorTree) owns
/// the root there is no path to a `&mut BranchTask`.
#[derive(Debug, Default)]
pub struct BranchTask {
    id: TaskId,
    children: Vec<TaskNode>,
}

impl BranchTask {
    pub fn new(children: Vec<TaskNode>) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            children,
        }
    }

    /// Append a child; returns its index.
    pub fn add_child(&mut self, child: TaskNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Handle of the branch itself, used as the control of every child.
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn bind(&mut self, id: TaskId) {
        self.id = id;
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&TaskNode> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut TaskNode> {
        self.children.get_mut(index)
    }

    pub fn children(&self) -> &[TaskNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [TaskNode] {
        &mut self.children
    }

    /// Cancel every running child at index `start` or later; returns how many were cancelled.
    pub fn cancel_running_children(
        &mut self,
        start: usize,
        ctx: &TickContext,
        blackboard: &mut Blackboard,
    ) -> Result<usize> {
        let mut cancelled = 0;
        for child in self.children.iter_mut().skip(start) {
            if child.cancel(ctx, blackboard)? {
                cancelled += 1;
            }
        }
        Ok(cancelled)
    }

    pub fn reset_children_task(&mut self) {
        for child in self.children.iter_mut() {
            child.reset_task();
        }
    }

    pub fn reset_children(&mut self) {
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}
