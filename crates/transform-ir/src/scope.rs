//! Region branching: how control moves between an operation and the regions it owns.
//!
//! The only construct with this capability is the scope, which owns a single body region. Control
//! enters the body first; once the body reaches its terminator, the terminator's operands become
//! the scope's results and control leaves the scope.

#[cfg(test)]
#[path = "scope_test.rs"]
mod test;

use itertools::zip_eq;
use log::trace;

use crate::graph::IrGraph;
use crate::objects::{OperationId, OperationKind, RegionId, ValueId};
use crate::verifier::{Violation, ViolationKind};

/// Where control may go next.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionSuccessor {
    /// Into one of the operation's own regions.
    Region(RegionId),
    /// Out of the operation, defining its results.
    ParentResults(Vec<ValueId>),
}

/// The capability of an operation to describe its control flow between its regions.
pub trait RegionBranchOpInterface: Sync {
    /// Returns the successors of `op`, when coming from its parent (`from == None`) or from the
    /// region at index `from`.
    ///
    /// `from` must be `None` or the index of one of the regions of `op`. A scope has a single
    /// region, so it treats every `Some` index as coming from its body.
    ///
    /// Fails with the structural violation if `op` is malformed.
    fn successors(
        &self,
        graph: &IrGraph,
        op: OperationId,
        from: Option<usize>,
    ) -> Result<Vec<RegionSuccessor>, Violation>;

    /// Checks that `op` has the shape the successor query relies on.
    fn verify_structure(&self, graph: &IrGraph, op: OperationId) -> Option<Violation>;
}

/// The scoped control-flow construct.
pub struct ScopeOp;
impl ScopeOp {
    /// Returns the single body region of the scope.
    pub fn body(graph: &IrGraph, op: OperationId) -> Result<RegionId, Violation> {
        let operation = graph.operation(op);
        if operation.kind != OperationKind::Scope {
            return Err(Violation::structural(op, ViolationKind::NotAScope));
        }
        match operation.regions() {
            [body] => Ok(*body),
            regions => Err(Violation::structural(
                op,
                ViolationKind::BodyRegionCount { found: regions.len() },
            )),
        }
    }

    /// Pairs each value yielded by the body's terminator with the scope result it becomes.
    pub fn result_bindings(
        graph: &IrGraph,
        op: OperationId,
    ) -> Result<Vec<(ValueId, ValueId)>, Violation> {
        let body = Self::body(graph, op)?;
        let terminator = graph
            .region(body)
            .terminator()
            .ok_or_else(|| Violation::structural(op, ViolationKind::MissingTerminator))?;
        let yielded = graph.operation(terminator).operands();
        let results = graph.operation(op).results();
        if yielded.len() != results.len() {
            return Err(Violation::structural(
                op,
                ViolationKind::ScopeArityMismatch {
                    terminator,
                    yielded: yielded.len(),
                    results: results.len(),
                },
            ));
        }
        Ok(zip_eq(yielded.iter().copied(), results.iter().copied()).collect())
    }
}
impl RegionBranchOpInterface for ScopeOp {
    fn successors(
        &self,
        graph: &IrGraph,
        op: OperationId,
        from: Option<usize>,
    ) -> Result<Vec<RegionSuccessor>, Violation> {
        if let Some(violation) = self.verify_structure(graph, op) {
            return Err(violation);
        }
        // There is a single region, so any origin index means the body has completed.
        let successor = match from {
            None => RegionSuccessor::Region(Self::body(graph, op)?),
            Some(_) => RegionSuccessor::ParentResults(graph.operation(op).results().to_vec()),
        };
        trace!(target: "scope", "successor of scope #{} from {from:?}: {successor:?}", op.index());
        Ok(vec![successor])
    }

    fn verify_structure(&self, graph: &IrGraph, op: OperationId) -> Option<Violation> {
        Self::result_bindings(graph, op).err()
    }
}

/// The progress of control through one scope instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeState {
    /// Control has not entered the body yet.
    Unentered,
    /// Control is inside the body.
    Body,
    /// The body completed and the scope's results are defined.
    Exited,
}
impl ScopeState {
    /// Moves control one step forward through the scope `op`.
    ///
    /// Returns the successor taken along with the new state, or `None` once the scope was exited.
    pub fn advance(
        self,
        graph: &IrGraph,
        op: OperationId,
    ) -> Result<Option<(RegionSuccessor, ScopeState)>, Violation> {
        let (from, next) = match self {
            ScopeState::Unentered => (None, ScopeState::Body),
            ScopeState::Body => (Some(0), ScopeState::Exited),
            ScopeState::Exited => return Ok(None),
        };
        // A well-formed scope has exactly one successor from each state.
        let successor = ScopeOp.successors(graph, op, from)?.into_iter().next();
        Ok(successor.map(|successor| (successor, next)))
    }
}
