use pretty_assertions::assert_eq;
use test_log::test;

use super::{IrError, IrGraph};
use crate::objects::{OpUse, OperationKind, OperationState, Type, ValueDef};
use crate::test_utils::ScriptBuilder;

fn op_use(owner: crate::OperationId, operand_index: usize) -> OpUse {
    OpUse { owner, operand_index }
}

#[test]
fn test_create_operation() {
    let mut graph = IrGraph::new();
    let producer = graph
        .create_operation(
            OperationState::new(OperationKind::custom("test.produce"))
                .with_results([Type::new("!t"), Type::new("!u")]),
        )
        .unwrap();
    let [a, b] = graph.operation(producer).results() else { panic!("Expected two results.") };
    let (a, b) = (*a, *b);
    assert_eq!(graph.value(b).def, ValueDef::Result { op: producer, index: 1 });
    assert_eq!(graph.value(b).defining_op(), Some((producer, 1)));
    assert_eq!(graph.result(producer, 0), Some(a));
    assert_eq!(graph.result(producer, 2), None);

    let consumer = graph
        .create_operation(
            OperationState::new(OperationKind::custom("test.consume")).with_operands([b, a, b]),
        )
        .unwrap();
    assert_eq!(graph.operation(consumer).operands(), [b, a, b]);
    assert_eq!(graph.uses(a), [op_use(consumer, 1)]);
    assert_eq!(graph.uses(b), [op_use(consumer, 0), op_use(consumer, 2)]);
    assert_eq!(graph.operation(consumer).parent(), None);
    assert_eq!(graph.operations().count(), 2);
}

#[test]
fn test_region_arguments_and_placement() {
    let mut builder = ScriptBuilder::new();
    let (sequence, body) = builder.sequence(&["root"]);
    let root = builder.value("root");
    assert_eq!(builder.graph.value(root).def, ValueDef::Argument { region: body, index: 0 });
    assert_eq!(builder.graph.value(root).defining_op(), None);

    let (scope, scope_body) = builder.scope(body, &["root"], &["r"]);
    let inner = builder.op(scope_body, "test.inner", &[], &["x"]);
    assert_eq!(builder.graph.region(body).operations(), [scope]);
    assert_eq!(builder.graph.region(scope_body).parent(), scope);
    assert_eq!(builder.graph.parent_operation(inner), Some(scope));
    assert_eq!(builder.graph.parent_operation(scope), Some(sequence));
    assert_eq!(builder.graph.parent_operation(sequence), None);
    assert_eq!(builder.graph.region(scope_body).terminator(), Some(inner));

    let names: Vec<_> = builder.named_values().map(|(name, _)| name).collect();
    assert_eq!(names, ["root", "r", "x"]);
    assert_eq!(builder.graph.value(builder.value("r")).defining_op(), Some((scope, 0)));
}

#[test]
fn test_set_operand() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&["a", "b"]);
    let consumer = builder.op(body, "test.consume", &["a", "b", "a"], &[]);
    let (a, b) = (builder.value("a"), builder.value("b"));

    assert_eq!(builder.graph.set_operand(consumer, 0, b), Ok(a));
    assert_eq!(builder.graph.operation(consumer).operands(), [b, b, a]);
    assert_eq!(builder.graph.uses(a), [op_use(consumer, 2)]);
    assert_eq!(builder.graph.uses(b), [op_use(consumer, 1), op_use(consumer, 0)]);

    assert_eq!(
        builder.graph.set_operand(consumer, 3, a),
        Err(IrError::OperandOutOfRange { op: consumer.index(), index: 3 })
    );
}

#[test]
fn test_erase_operand() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&["a", "b", "c"]);
    let consumer = builder.op(body, "test.consume", &["a", "b", "c", "b"], &[]);
    let (a, b, c) = (builder.value("a"), builder.value("b"), builder.value("c"));

    assert_eq!(builder.graph.erase_operand(consumer, 1), Ok(b));
    assert_eq!(builder.graph.operation(consumer).operands(), [a, c, b]);
    assert_eq!(builder.graph.uses(a), [op_use(consumer, 0)]);
    assert_eq!(builder.graph.uses(b), [op_use(consumer, 2)]);
    assert_eq!(builder.graph.uses(c), [op_use(consumer, 1)]);

    assert_eq!(builder.graph.erase_operand(consumer, 0), Ok(a));
    assert!(builder.graph.uses(a).is_empty());
    assert_eq!(builder.graph.uses(b), [op_use(consumer, 1)]);
    assert_eq!(builder.graph.uses(c), [op_use(consumer, 0)]);

    assert_eq!(builder.graph.push_operand(consumer, a), Ok(2));
    assert_eq!(builder.graph.uses(a), [op_use(consumer, 2)]);
}

#[test]
fn test_placement_errors() {
    let mut builder = ScriptBuilder::new();
    let (sequence, body) = builder.sequence(&[]);
    let (scope, scope_body) = builder.scope(body, &[], &[]);
    let (nested, nested_body) = builder.scope(scope_body, &[], &[]);

    assert_eq!(
        builder.graph.append_operation(body, nested),
        Err(IrError::OperationAlreadyPlaced(nested.index()))
    );
    assert_eq!(
        builder.graph.append_operation(nested_body, sequence),
        Err(IrError::RegionCycle { op: sequence.index(), region: nested_body.index() })
    );

    let detached = builder
        .graph
        .create_operation(OperationState::new(OperationKind::Scope).with_regions(1))
        .unwrap();
    let detached_body = builder.graph.operation(detached).regions()[0];
    assert_eq!(
        builder.graph.append_operation(detached_body, detached),
        Err(IrError::RegionCycle { op: detached.index(), region: detached_body.index() })
    );
    assert_eq!(builder.graph.append_operation(scope_body, detached), Ok(()));
    assert_eq!(builder.graph.region(scope_body).operations(), [nested, detached]);
    assert_eq!(builder.graph.parent_operation(detached), Some(scope));
}

#[test]
fn test_foreign_ids() {
    let mut other = IrGraph::new();
    let foreign = other
        .create_operation(
            OperationState::new(OperationKind::custom("test.produce"))
                .with_results([Type::new("!t")])
                .with_regions(1),
        )
        .unwrap();
    let foreign_value = other.operation(foreign).results()[0];
    let foreign_region = other.operation(foreign).regions()[0];

    let mut graph = IrGraph::new();
    let consume =
        OperationState::new(OperationKind::custom("test.consume")).with_operands([foreign_value]);
    assert_eq!(graph.create_operation(consume), Err(IrError::UnknownValue(foreign_value.index())));
    assert_eq!(
        graph.add_region_argument(foreign_region, Type::new("!t")),
        Err(IrError::UnknownRegion(foreign_region.index()))
    );
    assert_eq!(graph.operations().count(), 0);
    assert_eq!(
        IrError::UnknownValue(3).to_string(),
        "value #3 does not belong to this graph".to_string()
    );
}
