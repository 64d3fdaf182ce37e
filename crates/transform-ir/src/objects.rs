//! Objects of the transform IR.
//!
//! Operations own their results and regions, regions own their operations. Values only keep
//! non-owning back-references to the operand slots that read them, so a value's uses change only
//! when an operand list is edited through [crate::IrGraph].

use std::fmt;

use id_arena::Id;
use smol_str::SmolStr;
use transform_ir_diagnostics::DiagnosticLocation;

use crate::scope::{RegionBranchOpInterface, ScopeOp};

pub type OperationId = Id<Operation>;
pub type RegionId = Id<Region>;
pub type ValueId = Id<Value>;

/// An opaque type tag, e.g. `!pdl.operation`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type(pub SmolStr);
impl Type {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }
}
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an operation came from, used for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Location {
    #[default]
    Unknown,
    FileLineCol(DiagnosticLocation),
}
impl Location {
    pub fn file_line_col(file_name: impl Into<SmolStr>, line: u32, col: u32) -> Self {
        Self::FileLineCol(DiagnosticLocation::new(file_name, line, col))
    }

    pub fn diagnostic_location(&self) -> Option<DiagnosticLocation> {
        match self {
            Location::Unknown => None,
            Location::FileLineCol(location) => Some(location.clone()),
        }
    }
}

/// The kind of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A linear sequence of transformations; its single region runs top to bottom.
    Sequence,
    /// A scoped construct whose body's terminator operands become its results.
    Scope,
    /// A region terminator forwarding its operands to the enclosing operation.
    Yield,
    /// Any other operation, identified by its name.
    Custom(SmolStr),
}
impl OperationKind {
    pub fn custom(name: impl Into<SmolStr>) -> Self {
        Self::Custom(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            OperationKind::Sequence => "transform.sequence",
            OperationKind::Scope => "transform.scope",
            OperationKind::Yield => "transform.yield",
            OperationKind::Custom(name) => name,
        }
    }

    /// Returns the region branching capability of this kind of operation, if it has one.
    ///
    /// Generic region-based analyses must go through this lookup instead of assuming every
    /// operation can describe its successors.
    pub fn region_branch(&self) -> Option<&'static dyn RegionBranchOpInterface> {
        match self {
            OperationKind::Scope => Some(&ScopeOp),
            OperationKind::Sequence | OperationKind::Yield | OperationKind::Custom(_) => None,
        }
    }
}

/// A node of the IR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub location: Location,
    pub(crate) operands: Vec<ValueId>,
    pub(crate) results: Vec<ValueId>,
    pub(crate) regions: Vec<RegionId>,
    pub(crate) parent: Option<RegionId>,
}
impl Operation {
    /// The values read by this operation, by operand position.
    pub fn operands(&self) -> &[ValueId] {
        &self.operands
    }

    /// The values defined by this operation, in declaration order.
    pub fn results(&self) -> &[ValueId] {
        &self.results
    }

    /// The regions owned by this operation, in declaration order.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// The region this operation was placed in, if any.
    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn region_branch(&self) -> Option<&'static dyn RegionBranchOpInterface> {
        self.kind.region_branch()
    }
}

/// An ordered body of operations, owned by a single operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub(crate) parent: OperationId,
    pub(crate) arguments: Vec<ValueId>,
    pub(crate) operations: Vec<OperationId>,
}
impl Region {
    pub fn parent(&self) -> OperationId {
        self.parent
    }

    pub fn arguments(&self) -> &[ValueId] {
        &self.arguments
    }

    pub fn operations(&self) -> &[OperationId] {
        &self.operations
    }

    /// The last operation of the body. Its operands are the values the region produces.
    pub fn terminator(&self) -> Option<OperationId> {
        self.operations.last().copied()
    }
}

/// Where a value is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueDef {
    Result { op: OperationId, index: usize },
    Argument { region: RegionId, index: usize },
}

/// A single operand slot reading a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpUse {
    /// The consuming operation.
    pub owner: OperationId,
    pub operand_index: usize,
}

/// A typed datum, either an operation result or a region argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    pub ty: Type,
    pub def: ValueDef,
    pub(crate) uses: Vec<OpUse>,
}
impl Value {
    /// The operand slots reading this value, in the order they were attached.
    pub fn uses(&self) -> &[OpUse] {
        &self.uses
    }

    /// Returns the defining operation and result index, if this value is an operation result.
    pub fn defining_op(&self) -> Option<(OperationId, usize)> {
        match self.def {
            ValueDef::Result { op, index } => Some((op, index)),
            ValueDef::Argument { .. } => None,
        }
    }
}

/// Everything needed to create an operation, see [crate::IrGraph::create_operation].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationState {
    pub kind: OperationKind,
    pub operands: Vec<ValueId>,
    pub result_types: Vec<Type>,
    pub num_regions: usize,
    pub location: Location,
}
impl OperationState {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            operands: vec![],
            result_types: vec![],
            num_regions: 0,
            location: Location::Unknown,
        }
    }

    pub fn with_operands(mut self, operands: impl IntoIterator<Item = ValueId>) -> Self {
        self.operands = operands.into_iter().collect();
        self
    }

    pub fn with_results(mut self, result_types: impl IntoIterator<Item = Type>) -> Self {
        self.result_types = result_types.into_iter().collect();
        self
    }

    pub fn with_regions(mut self, num_regions: usize) -> Self {
        self.num_regions = num_regions;
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}
