//! Forward traversal of a script in execution order.
//!
//! Operations with region branching are stepped through using their successor queries: the
//! regions they name are run in place, and leaving to the parent's results resumes the enclosing
//! region. Operations without the capability are opaque.

#[cfg(test)]
#[path = "flow_test.rs"]
mod test;

use std::collections::VecDeque;

use log::trace;

use crate::graph::IrGraph;
use crate::objects::{Operation, OperationId, RegionId, ValueId};
use crate::scope::RegionSuccessor;
use crate::verifier::Violation;

/// Analyzer trait to implement for each specific forward analysis.
#[allow(unused_variables)]
pub trait FlowAnalyzer {
    type Info;
    fn visit_operation(&mut self, info: &mut Self::Info, op_id: OperationId, op: &Operation);
    fn enter_region(&mut self, info: &mut Self::Info, op_id: OperationId, region_id: RegionId) {}
    fn exit_to_results(
        &mut self,
        info: &mut Self::Info,
        op_id: OperationId,
        results: &[ValueId],
    ) {
    }
}

/// Main analysis type that runs a [FlowAnalyzer] over a script.
pub struct RegionFlow<'a, TAnalyzer: FlowAnalyzer> {
    graph: &'a IrGraph,
    pub analyzer: TAnalyzer,
}
impl<'a, TAnalyzer: FlowAnalyzer> RegionFlow<'a, TAnalyzer> {
    pub fn new(graph: &'a IrGraph, analyzer: TAnalyzer) -> Self {
        Self { graph, analyzer }
    }

    /// Runs the bodies of `root` one after the other, without visiting `root` itself.
    pub fn run(&mut self, root: OperationId) -> Result<TAnalyzer::Info, Violation>
    where
        TAnalyzer::Info: Default,
    {
        let mut info = TAnalyzer::Info::default();
        let graph = self.graph;
        for region in graph.operation(root).regions() {
            self.run_region(&mut info, *region)?;
        }
        Ok(info)
    }

    /// Runs the operations of `region` in order.
    pub fn run_region(
        &mut self,
        info: &mut TAnalyzer::Info,
        region: RegionId,
    ) -> Result<(), Violation> {
        let graph = self.graph;
        for op_id in graph.region(region).operations() {
            self.run_operation(info, *op_id)?;
        }
        Ok(())
    }

    fn run_operation(
        &mut self,
        info: &mut TAnalyzer::Info,
        op_id: OperationId,
    ) -> Result<(), Violation> {
        let graph = self.graph;
        let op = graph.operation(op_id);
        self.analyzer.visit_operation(info, op_id, op);
        let Some(branch) = op.region_branch() else {
            return Ok(());
        };
        let mut pending: VecDeque<_> = branch.successors(graph, op_id, None)?.into();
        let mut entered = vec![];
        while let Some(successor) = pending.pop_front() {
            match successor {
                RegionSuccessor::Region(region) => {
                    // A region runs at most once per operation instance.
                    if entered.contains(&region) {
                        continue;
                    }
                    entered.push(region);
                    trace!(target: "flow", "entering region of #{}", op_id.index());
                    self.analyzer.enter_region(info, op_id, region);
                    self.run_region(info, region)?;
                    let index = op.regions().iter().position(|r| *r == region);
                    pending.extend(branch.successors(graph, op_id, index)?);
                }
                RegionSuccessor::ParentResults(results) => {
                    trace!(
                        target: "flow",
                        "leaving #{} with {} result(s)",
                        op_id.index(),
                        results.len()
                    );
                    self.analyzer.exit_to_results(info, op_id, &results);
                }
            }
        }
        Ok(())
    }
}

/// A step of a script's execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowStep {
    Execute(OperationId),
    EnterRegion(OperationId, RegionId),
    ExitToResults(OperationId),
}

/// Records the execution order of a script.
#[derive(Default)]
pub struct ExecutionTrace;
impl FlowAnalyzer for ExecutionTrace {
    type Info = Vec<FlowStep>;

    fn visit_operation(&mut self, info: &mut Self::Info, op_id: OperationId, _op: &Operation) {
        info.push(FlowStep::Execute(op_id));
    }

    fn enter_region(&mut self, info: &mut Self::Info, op_id: OperationId, region_id: RegionId) {
        info.push(FlowStep::EnterRegion(op_id, region_id));
    }

    fn exit_to_results(
        &mut self,
        info: &mut Self::Info,
        op_id: OperationId,
        _results: &[ValueId],
    ) {
        info.push(FlowStep::ExitToResults(op_id));
    }
}

/// Returns the execution order of the bodies of `root`.
pub fn execution_trace(graph: &IrGraph, root: OperationId) -> Result<Vec<FlowStep>, Violation> {
    RegionFlow::new(graph, ExecutionTrace).run(root)
}
