//! The linear-use verifier.
//!
//! Every intermediate result of a transform script may be consumed by at most one later step, so
//! the script can be run as a pipeline where each handle is spent once. Results that are never
//! used are fine.


use log::{debug, trace};

pub use self::config::VerifierConfig;
pub use self::report::{ValidationReport, Violation, ViolationKind};
use crate::graph::IrGraph;
use crate::objects::OperationId;
use crate::walk::{WalkControl, walk};

pub mod config;
pub mod report;

/// Checks the single-use ceiling over an operation and everything nested in it.
#[derive(Clone, Debug, Default)]
pub struct LinearUseVerifier {
    config: VerifierConfig,
}
impl LinearUseVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Collects every violation under `root`, in pre-order of the operations they are reported at.
    ///
    /// For each operation, the structural check of its region branching (if enabled and
    /// applicable) comes first, followed by its results in declaration order.
    pub fn verify(&self, graph: &IrGraph, root: OperationId) -> ValidationReport {
        let mut violations = vec![];
        let walk_result = walk(graph, root, |op_id, op| {
            if self.config.structural_checks {
                if let Some(violation) =
                    op.region_branch().and_then(|branch| branch.verify_structure(graph, op_id))
                {
                    debug!(
                        target: "verifier",
                        "malformed {} #{}: {:?}",
                        op.name(),
                        op_id.index(),
                        violation.kind
                    );
                    violations.push(violation);
                }
            }
            for (result_index, result) in op.results().iter().enumerate() {
                let uses = graph.uses(*result);
                trace!(
                    target: "verifier",
                    "result #{result_index} of #{} has {} use(s)",
                    op_id.index(),
                    uses.len()
                );
                if uses.len() <= 1 {
                    continue;
                }
                debug!(
                    target: "verifier",
                    "result #{result_index} of {} #{} has more than one use",
                    op.name(),
                    op_id.index()
                );
                violations.push(Violation::multiple_uses(op_id, result_index, uses.to_vec()));
            }
            WalkControl::Advance
        });
        debug_assert!(!walk_result.was_interrupted());
        debug!(target: "verifier", "verified #{}: {} violation(s)", root.index(), violations.len());
        ValidationReport { violations }
    }
}

/// Verifies `sequence` with the default configuration.
pub fn verify_sequence(graph: &IrGraph, sequence: OperationId) -> ValidationReport {
    LinearUseVerifier::default().verify(graph, sequence)
}
