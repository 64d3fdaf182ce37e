//! Pre-order traversal of an operation and everything nested in its regions.

#[cfg(test)]
#[path = "walk_test.rs"]
mod test;

use log::trace;

use crate::graph::IrGraph;
use crate::objects::{Operation, OperationId};

/// Returned by a walk visitor to decide whether the walk goes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkControl {
    Advance,
    Interrupt,
}

/// How a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkResult {
    Completed,
    Interrupted,
}
impl WalkResult {
    pub fn was_interrupted(self) -> bool {
        self == WalkResult::Interrupted
    }
}

/// Visits `root`, then every operation of every region owned by `root` in declaration order,
/// descending into an operation's regions before moving on to its next sibling.
///
/// The walk is the same for every kind of operation: nested scope bodies are visited like any
/// other region. It stops right after `visit` returns [WalkControl::Interrupt].
pub fn walk(
    graph: &IrGraph,
    root: OperationId,
    mut visit: impl FnMut(OperationId, &Operation) -> WalkControl,
) -> WalkResult {
    let mut dfs_stack = vec![root];
    while let Some(op_id) = dfs_stack.pop() {
        let op = graph.operation(op_id);
        trace!(target: "walker", "visiting {} #{}", op.name(), op_id.index());
        if visit(op_id, op) == WalkControl::Interrupt {
            trace!(target: "walker", "interrupted at #{}", op_id.index());
            return WalkResult::Interrupted;
        }
        // Pushed in reverse so the first operation of the first region is popped next.
        for region in op.regions().iter().rev() {
            dfs_stack.extend(graph.region(*region).operations().iter().rev());
        }
    }
    WalkResult::Completed
}

/// Returns `root` and all the operations nested in it, in walk order.
pub fn preorder(graph: &IrGraph, root: OperationId) -> Vec<OperationId> {
    let mut order = vec![];
    walk(graph, root, |op_id, _| {
        order.push(op_id);
        WalkControl::Advance
    });
    order
}
