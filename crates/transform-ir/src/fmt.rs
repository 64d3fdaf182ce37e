#[cfg(test)]
#[path = "fmt_test.rs"]
mod test;

use transform_ir_debug::DebugWithDb;
use transform_ir_utils::write_comma_separated;

use crate::graph::IrGraph;
use crate::objects::{OperationId, RegionId, ValueId};

/// Holds all the information needed for formatting transform scripts.
/// Acts like a "db" for DebugWithDb.
pub struct IrFormatter<'a> {
    pub graph: &'a IrGraph,
}
impl<'a> IrFormatter<'a> {
    pub fn new(graph: &'a IrGraph) -> Self {
        Self { graph }
    }
}

impl DebugWithDb<IrFormatter<'_>> for ValueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>, _ctx: &IrFormatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.index())
    }
}

impl DebugWithDb<IrFormatter<'_>> for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>, ctx: &IrFormatter<'_>) -> std::fmt::Result {
        format_operation(*self, f, ctx, 0)
    }
}

impl DebugWithDb<IrFormatter<'_>> for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>, ctx: &IrFormatter<'_>) -> std::fmt::Result {
        format_region_body(*self, f, ctx, 0)
    }
}

fn format_operation(
    op_id: OperationId,
    f: &mut std::fmt::Formatter<'_>,
    ctx: &IrFormatter<'_>,
    depth: usize,
) -> std::fmt::Result {
    let op = ctx.graph.operation(op_id);
    if !op.results().is_empty() {
        write_comma_separated(f, op.results().iter().map(|result| format!("%{}", result.index())))?;
        write!(f, " = ")?;
    }
    write!(f, "{}(", op.name())?;
    write_comma_separated(f, op.operands().iter().map(|operand| format!("%{}", operand.index())))?;
    write!(f, ")")?;
    if !op.results().is_empty() {
        write!(f, " : ")?;
        write_comma_separated(f, op.results().iter().map(|result| &ctx.graph.value(*result).ty))?;
    }
    for region in op.regions() {
        writeln!(f, " {{")?;
        format_region_body(*region, f, ctx, depth + 1)?;
        write!(f, "{}}}", indent(depth))?;
    }
    Ok(())
}

/// Writes the arguments and operations of a region, one per line, at the given nesting depth.
fn format_region_body(
    region_id: RegionId,
    f: &mut std::fmt::Formatter<'_>,
    ctx: &IrFormatter<'_>,
    depth: usize,
) -> std::fmt::Result {
    let region = ctx.graph.region(region_id);
    if !region.arguments().is_empty() {
        write!(f, "{}^bb(", indent(depth.saturating_sub(1)))?;
        write_comma_separated(
            f,
            region.arguments().iter().map(|argument| {
                format!("%{}: {}", argument.index(), ctx.graph.value(*argument).ty)
            }),
        )?;
        writeln!(f, "):")?;
    }
    for op_id in region.operations() {
        write!(f, "{}", indent(depth))?;
        format_operation(*op_id, f, ctx, depth)?;
        writeln!(f)?;
    }
    Ok(())
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
