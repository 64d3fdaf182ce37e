//! The arena-backed operation graph.

#[cfg(test)]
#[path = "graph_test.rs"]
mod test;

use id_arena::Arena;
use thiserror::Error;
use transform_ir_utils::require;

use crate::objects::{
    OpUse, Operation, OperationId, OperationState, Region, RegionId, Type, Value, ValueDef,
    ValueId,
};

/// Errors raised while building or editing an [IrGraph].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IrError {
    #[error("value #{0} does not belong to this graph")]
    UnknownValue(usize),
    #[error("operation #{0} does not belong to this graph")]
    UnknownOperation(usize),
    #[error("region #{0} does not belong to this graph")]
    UnknownRegion(usize),
    #[error("operation #{op} has no operand #{index}")]
    OperandOutOfRange { op: usize, index: usize },
    #[error("operation #{0} is already placed in a region")]
    OperationAlreadyPlaced(usize),
    #[error("placing operation #{op} in region #{region} would make it contain itself")]
    RegionCycle { op: usize, region: usize },
}

/// An operation graph: the arenas holding every operation, region and value of a script.
///
/// Reads are pure. Value use-lists are only changed by the operand editing methods, which keep
/// each value's uses in attach order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrGraph {
    operations: Arena<Operation>,
    regions: Arena<Region>,
    values: Arena<Value>,
}
impl Default for IrGraph {
    fn default() -> Self {
        Self::new()
    }
}
impl IrGraph {
    pub fn new() -> Self {
        Self { operations: Arena::new(), regions: Arena::new(), values: Arena::new() }
    }

    pub fn operation(&self, id: OperationId) -> &Operation {
        &self.operations[id]
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id]
    }

    pub fn value(&self, id: ValueId) -> &Value {
        &self.values[id]
    }

    /// The operand slots reading `value`, in a stable order.
    pub fn uses(&self, value: ValueId) -> &[OpUse] {
        self.values[value].uses()
    }

    /// Returns the `index`-th result of `op`.
    pub fn result(&self, op: OperationId, index: usize) -> Option<ValueId> {
        self.operations[op].results.get(index).copied()
    }

    /// Returns the operation owning the region `op` is placed in.
    pub fn parent_operation(&self, op: OperationId) -> Option<OperationId> {
        self.operations[op].parent.map(|region| self.regions[region].parent)
    }

    /// Iterates all the operations of the graph, in allocation order.
    pub fn operations(&self) -> impl Iterator<Item = (OperationId, &Operation)> {
        self.operations.iter()
    }

    /// Creates a detached operation with fresh results and empty owned regions, and attaches a
    /// use for each of its operands.
    pub fn create_operation(&mut self, state: OperationState) -> Result<OperationId, IrError> {
        let OperationState { kind, operands, result_types, num_regions, location } = state;
        for operand in &operands {
            self.check_value(*operand)?;
        }
        let op = self.operations.alloc(Operation {
            kind,
            location,
            operands: vec![],
            results: vec![],
            regions: vec![],
            parent: None,
        });
        let results: Vec<ValueId> = result_types
            .into_iter()
            .enumerate()
            .map(|(index, ty)| {
                self.values.alloc(Value { ty, def: ValueDef::Result { op, index }, uses: vec![] })
            })
            .collect();
        let regions: Vec<RegionId> = (0..num_regions)
            .map(|_| {
                self.regions.alloc(Region { parent: op, arguments: vec![], operations: vec![] })
            })
            .collect();
        let operation = &mut self.operations[op];
        operation.results = results;
        operation.regions = regions;
        for operand in operands {
            self.attach(op, operand);
        }
        Ok(op)
    }

    /// Adds a typed argument to the end of `region`'s argument list.
    pub fn add_region_argument(&mut self, region: RegionId, ty: Type) -> Result<ValueId, IrError> {
        self.check_region(region)?;
        let index = self.regions[region].arguments.len();
        let def = ValueDef::Argument { region, index };
        let value = self.values.alloc(Value { ty, def, uses: vec![] });
        self.regions[region].arguments.push(value);
        Ok(value)
    }

    /// Places the detached operation `op` at the end of `region`.
    pub fn append_operation(&mut self, region: RegionId, op: OperationId) -> Result<(), IrError> {
        self.check_region(region)?;
        self.check_operation(op)?;
        require(self.operations[op].parent.is_none())
            .ok_or(IrError::OperationAlreadyPlaced(op.index()))?;
        // Walk up the ownership chain of `region`; meeting `op` means `op` would own itself.
        let mut owner = Some(self.regions[region].parent);
        while let Some(current) = owner {
            if current == op {
                return Err(IrError::RegionCycle { op: op.index(), region: region.index() });
            }
            owner = self.parent_operation(current);
        }
        self.operations[op].parent = Some(region);
        self.regions[region].operations.push(op);
        Ok(())
    }

    /// Appends `value` as a new last operand of `op`. Returns the new operand's index.
    pub fn push_operand(&mut self, op: OperationId, value: ValueId) -> Result<usize, IrError> {
        self.check_operation(op)?;
        self.check_value(value)?;
        Ok(self.attach(op, value))
    }

    /// Rebinds operand `index` of `op` to `value`. Returns the previously bound value.
    pub fn set_operand(
        &mut self,
        op: OperationId,
        index: usize,
        value: ValueId,
    ) -> Result<ValueId, IrError> {
        self.check_operation(op)?;
        self.check_value(value)?;
        let previous = self.operand(op, index)?;
        self.detach(OpUse { owner: op, operand_index: index }, previous);
        self.operations[op].operands[index] = value;
        self.values[value].uses.push(OpUse { owner: op, operand_index: index });
        Ok(previous)
    }

    /// Removes operand `index` of `op`, shifting the later operands (and their uses) down by one.
    /// Returns the value the removed operand was bound to.
    pub fn erase_operand(&mut self, op: OperationId, index: usize) -> Result<ValueId, IrError> {
        self.check_operation(op)?;
        let previous = self.operand(op, index)?;
        self.detach(OpUse { owner: op, operand_index: index }, previous);
        self.operations[op].operands.remove(index);
        let later = self.operations[op].operands[index..].to_vec();
        for (offset, value) in later.into_iter().enumerate() {
            let old_index = index + offset + 1;
            for op_use in self.values[value].uses.iter_mut() {
                if op_use.owner == op && op_use.operand_index == old_index {
                    op_use.operand_index -= 1;
                    break;
                }
            }
        }
        Ok(previous)
    }

    fn operand(&self, op: OperationId, index: usize) -> Result<ValueId, IrError> {
        self.operations[op]
            .operands
            .get(index)
            .copied()
            .ok_or(IrError::OperandOutOfRange { op: op.index(), index })
    }

    fn attach(&mut self, op: OperationId, value: ValueId) -> usize {
        let operands = &mut self.operations[op].operands;
        let operand_index = operands.len();
        operands.push(value);
        self.values[value].uses.push(OpUse { owner: op, operand_index });
        operand_index
    }

    fn detach(&mut self, op_use: OpUse, value: ValueId) {
        let uses = &mut self.values[value].uses;
        if let Some(position) = uses.iter().position(|existing| *existing == op_use) {
            // The remaining uses keep their attach order.
            uses.remove(position);
        }
    }

    fn check_value(&self, value: ValueId) -> Result<(), IrError> {
        self.values.get(value).map(|_| ()).ok_or(IrError::UnknownValue(value.index()))
    }

    fn check_operation(&self, op: OperationId) -> Result<(), IrError> {
        self.operations.get(op).map(|_| ()).ok_or(IrError::UnknownOperation(op.index()))
    }

    fn check_region(&self, region: RegionId) -> Result<(), IrError> {
        self.regions.get(region).map(|_| ()).ok_or(IrError::UnknownRegion(region.index()))
    }
}
