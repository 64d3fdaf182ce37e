use smol_str::SmolStr;
use transform_ir_utils::ordered_hash_map::OrderedHashMap;

use crate::graph::IrGraph;
use crate::objects::{
    Location, OperationId, OperationKind, OperationState, RegionId, Type, ValueId,
};

/// The file name given to the locations of built operations.
pub const SCRIPT_FILE: &str = "script.mlir";

/// The type of every value built by a [ScriptBuilder].
pub const HANDLE_TYPE: &str = "!transform.any_op";

/// Builds transform scripts for tests, naming values with strings.
///
/// Every built operation is located at `script.mlir:<n>:1`, where `n` counts the operations built
/// so far, starting at 1. This matches the line of the operation in the script's text form as long
/// as operations are built in textual order.
pub struct ScriptBuilder {
    pub graph: IrGraph,
    names: OrderedHashMap<SmolStr, ValueId>,
    next_line: u32,
}
impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
impl ScriptBuilder {
    pub fn new() -> Self {
        Self { graph: IrGraph::new(), names: OrderedHashMap::default(), next_line: 1 }
    }

    /// Creates a top-level sequence whose body has an argument for each of `args`.
    pub fn sequence(&mut self, args: &[&str]) -> (OperationId, RegionId) {
        let state = OperationState::new(OperationKind::Sequence).with_regions(1);
        let op = self.create(state);
        let body = self.graph.operation(op).regions()[0];
        for name in args {
            let value = self
                .graph
                .add_region_argument(body, Type::new(HANDLE_TYPE))
                .expect("Failed to add a region argument.");
            self.define(name, value);
        }
        (op, body)
    }

    /// Appends a custom operation to `region`.
    pub fn op(
        &mut self,
        region: RegionId,
        name: &str,
        operands: &[&str],
        results: &[&str],
    ) -> OperationId {
        self.append(region, OperationKind::custom(name), operands, results, 0)
    }

    /// Appends a scope with an empty body to `region`. Returns the scope and its body.
    pub fn scope(
        &mut self,
        region: RegionId,
        operands: &[&str],
        results: &[&str],
    ) -> (OperationId, RegionId) {
        let op = self.append(region, OperationKind::Scope, operands, results, 1);
        (op, self.graph.operation(op).regions()[0])
    }

    /// Appends a yield terminator to `region`.
    pub fn yield_(&mut self, region: RegionId, operands: &[&str]) -> OperationId {
        self.append(region, OperationKind::Yield, operands, &[], 0)
    }

    /// Appends an operation with an arbitrary number of regions, e.g. to build malformed scopes.
    pub fn append(
        &mut self,
        region: RegionId,
        kind: OperationKind,
        operands: &[&str],
        results: &[&str],
        num_regions: usize,
    ) -> OperationId {
        let operands: Vec<_> = operands.iter().map(|name| self.value(name)).collect();
        let state = OperationState::new(kind)
            .with_operands(operands)
            .with_results(results.iter().map(|_| Type::new(HANDLE_TYPE)))
            .with_regions(num_regions);
        let op = self.create(state);
        self.graph.append_operation(region, op).expect("Failed to append an operation.");
        for (name, result) in results.iter().zip(self.graph.operation(op).results().to_vec()) {
            self.define(name, result);
        }
        op
    }

    /// Returns the value named `name`.
    pub fn value(&self, name: &str) -> ValueId {
        *self.names.get(name).unwrap_or_else(|| panic!("Unknown value `{name}`."))
    }

    /// The named values, in definition order.
    pub fn named_values(&self) -> impl Iterator<Item = (&str, ValueId)> + '_ {
        self.names.iter().map(|(name, value)| (name.as_str(), *value))
    }

    fn define(&mut self, name: &str, value: ValueId) {
        let previous = self.names.insert(name.into(), value);
        assert!(previous.is_none(), "Value `{name}` is defined twice.");
    }

    fn create(&mut self, state: OperationState) -> OperationId {
        let state = state.at(Location::file_line_col(SCRIPT_FILE, self.next_line, 1));
        self.next_line += 1;
        self.graph.create_operation(state).expect("Failed to create an operation.")
    }
}
