//! Rendering of validation reports as diagnostics.

#[cfg(test)]
#[path = "diagnostic_test.rs"]
mod test;

use transform_ir_diagnostics::{
    DiagnosticEntry, DiagnosticLocation, DiagnosticNote, Diagnostics, DiagnosticsBuilder,
    ErrorCode, error_code,
};

use crate::graph::IrGraph;
use crate::objects::OperationId;
use crate::verifier::{ValidationReport, Violation, ViolationKind};

pub type IrDiagnostics = Diagnostics<Violation>;

impl DiagnosticEntry for Violation {
    type DbType = IrGraph;

    fn format(&self, db: &IrGraph) -> String {
        match &self.kind {
            ViolationKind::MultipleUses => {
                format!("result #{} has more than one use", self.result_index.unwrap_or_default())
            }
            ViolationKind::NotAScope => {
                format!("`{}` is not a scope operation", db.operation(self.operation).name())
            }
            ViolationKind::BodyRegionCount { found } => {
                format!("scope operation must own exactly one body region, found {found}")
            }
            ViolationKind::MissingTerminator => "scope body region has no terminator".into(),
            ViolationKind::ScopeArityMismatch { yielded, results, .. } => {
                format!("scope yields {yielded} values but declares {results} results")
            }
        }
    }

    fn location(&self, db: &IrGraph) -> Option<DiagnosticLocation> {
        db.operation(self.operation).location.diagnostic_location()
    }

    fn notes(&self, db: &IrGraph) -> Vec<DiagnosticNote> {
        match &self.kind {
            ViolationKind::MultipleUses => self
                .uses
                .iter()
                .map(|op_use| {
                    note_at(
                        db,
                        format!("used here as operand #{}", op_use.operand_index),
                        op_use.owner,
                    )
                })
                .collect(),
            ViolationKind::ScopeArityMismatch { terminator, .. } => {
                vec![note_at(db, "terminator here".into(), *terminator)]
            }
            ViolationKind::NotAScope
            | ViolationKind::BodyRegionCount { .. }
            | ViolationKind::MissingTerminator => vec![],
        }
    }

    fn error_code(&self) -> Option<ErrorCode> {
        Some(match self.kind {
            ViolationKind::MultipleUses => error_code!(E0001),
            ViolationKind::BodyRegionCount { .. } => error_code!(E0002),
            ViolationKind::MissingTerminator => error_code!(E0003),
            ViolationKind::ScopeArityMismatch { .. } => error_code!(E0004),
            ViolationKind::NotAScope => error_code!(E0005),
        })
    }
}

/// A note pointing at `op`, or a plain note if `op` has no known location.
fn note_at(db: &IrGraph, text: String, op: OperationId) -> DiagnosticNote {
    match db.operation(op).location.diagnostic_location() {
        Some(location) => DiagnosticNote::with_location(text, location),
        None => DiagnosticNote::text_only(text),
    }
}

impl ValidationReport {
    /// Turns the violations into diagnostics, keeping their order.
    pub fn to_diagnostics(&self) -> IrDiagnostics {
        let mut builder = DiagnosticsBuilder::default();
        for violation in &self.violations {
            builder.add(violation.clone());
        }
        builder.build()
    }
}
