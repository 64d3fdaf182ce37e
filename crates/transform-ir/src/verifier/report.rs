use crate::objects::{OpUse, OperationId};

/// What a [Violation] is about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A result is read by more than one operand slot.
    MultipleUses,
    /// The scope queries were asked about an operation that is not a scope.
    NotAScope,
    /// A scoped construct does not own exactly one region.
    BodyRegionCount { found: usize },
    /// A scoped construct's body is empty, so there is nothing to produce its results.
    MissingTerminator,
    /// A scoped construct's terminator forwards a different number of values than the construct
    /// declares results.
    ScopeArityMismatch { terminator: OperationId, yielded: usize, results: usize },
}

/// A single validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Violation {
    pub kind: ViolationKind,
    /// The operation the violation is reported at: the defining operation for
    /// [ViolationKind::MultipleUses], the malformed construct otherwise.
    pub operation: OperationId,
    /// The offending result, for [ViolationKind::MultipleUses].
    pub result_index: Option<usize>,
    /// The operand slots reading the offending result, in use order.
    pub uses: Vec<OpUse>,
}
impl Violation {
    pub fn multiple_uses(operation: OperationId, result_index: usize, uses: Vec<OpUse>) -> Self {
        let result_index = Some(result_index);
        Self { kind: ViolationKind::MultipleUses, operation, result_index, uses }
    }

    pub fn structural(operation: OperationId, kind: ViolationKind) -> Self {
        Self { kind, operation, result_index: None, uses: vec![] }
    }
}

/// The outcome of a verification run: every violation found, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}
impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }
}
