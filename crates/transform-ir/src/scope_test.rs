use pretty_assertions::assert_eq;
use test_case::test_case;
use test_log::test;

use super::{RegionBranchOpInterface, RegionSuccessor, ScopeOp, ScopeState};
use crate::objects::OperationKind;
use crate::test_utils::ScriptBuilder;
use crate::verifier::{Violation, ViolationKind};

/// Builds `%r0, %r1 = transform.scope { %x, %y = test.produce; transform.yield %y, %x }`.
fn well_formed_scope() -> (ScriptBuilder, crate::OperationId) {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let (scope, scope_body) = builder.scope(body, &[], &["r0", "r1"]);
    builder.op(scope_body, "test.produce", &[], &["x", "y"]);
    builder.yield_(scope_body, &["y", "x"]);
    (builder, scope)
}

#[test]
fn test_successors() {
    let (builder, scope) = well_formed_scope();
    let graph = &builder.graph;
    let body = graph.operation(scope).regions()[0];
    let results = graph.operation(scope).results().to_vec();

    assert_eq!(ScopeOp.successors(graph, scope, None), Ok(vec![RegionSuccessor::Region(body)]));
    assert_eq!(
        ScopeOp.successors(graph, scope, Some(0)),
        Ok(vec![RegionSuccessor::ParentResults(results)])
    );
    assert_eq!(ScopeOp.verify_structure(graph, scope), None);
}

#[test]
fn test_capability_lookup() {
    let (builder, scope) = well_formed_scope();
    let graph = &builder.graph;
    let branching: Vec<_> = graph
        .operations()
        .filter(|(_, op)| op.region_branch().is_some())
        .map(|(id, _)| id)
        .collect();
    assert_eq!(branching, [scope]);
    assert!(OperationKind::Scope.region_branch().is_some());
    assert!(OperationKind::Sequence.region_branch().is_none());
    assert!(OperationKind::Yield.region_branch().is_none());
    assert!(OperationKind::custom("test.produce").region_branch().is_none());
}

#[test]
fn test_result_bindings() {
    let (builder, scope) = well_formed_scope();
    assert_eq!(
        ScopeOp::result_bindings(&builder.graph, scope),
        Ok(vec![
            (builder.value("y"), builder.value("r0")),
            (builder.value("x"), builder.value("r1")),
        ])
    );
}

#[test]
fn test_empty_scope() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let (scope, scope_body) = builder.scope(body, &[], &[]);
    builder.yield_(scope_body, &[]);

    assert_eq!(ScopeOp::result_bindings(&builder.graph, scope), Ok(vec![]));
    assert_eq!(
        ScopeOp.successors(&builder.graph, scope, Some(0)),
        Ok(vec![RegionSuccessor::ParentResults(vec![])])
    );
}

#[test_case(0, ViolationKind::BodyRegionCount { found: 0 }; "no body")]
#[test_case(3, ViolationKind::BodyRegionCount { found: 3 }; "three bodies")]
fn test_region_count_violation(num_regions: usize, expected: ViolationKind) {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let scope = builder.append(body, OperationKind::Scope, &[], &[], num_regions);

    let violation = Violation::structural(scope, expected);
    assert_eq!(ScopeOp.successors(&builder.graph, scope, None), Err(violation.clone()));
    assert_eq!(ScopeOp.successors(&builder.graph, scope, Some(0)), Err(violation.clone()));
    assert_eq!(ScopeOp.verify_structure(&builder.graph, scope), Some(violation));
}

#[test]
fn test_arity_mismatch() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let (scope, scope_body) = builder.scope(body, &[], &["r0", "r1"]);
    builder.op(scope_body, "test.produce", &[], &["x"]);
    let terminator = builder.yield_(scope_body, &["x"]);

    let violation = Violation::structural(
        scope,
        ViolationKind::ScopeArityMismatch { terminator, yielded: 1, results: 2 },
    );
    assert_eq!(ScopeOp::result_bindings(&builder.graph, scope), Err(violation.clone()));
    assert_eq!(ScopeOp.successors(&builder.graph, scope, None), Err(violation.clone()));
    assert_eq!(ScopeState::Unentered.advance(&builder.graph, scope), Err(violation));
}

#[test]
fn test_missing_terminator() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let (scope, _) = builder.scope(body, &[], &[]);

    assert_eq!(
        ScopeOp.verify_structure(&builder.graph, scope),
        Some(Violation::structural(scope, ViolationKind::MissingTerminator))
    );
}

#[test]
fn test_state_machine() {
    let (builder, scope) = well_formed_scope();
    let graph = &builder.graph;
    let body = graph.operation(scope).regions()[0];
    let results = graph.operation(scope).results().to_vec();

    let mut state = ScopeState::Unentered;
    let mut taken = vec![];
    while let Some((successor, next)) = state.advance(graph, scope).unwrap() {
        taken.push((successor, next));
        state = next;
    }
    assert_eq!(
        taken,
        [
            (RegionSuccessor::Region(body), ScopeState::Body),
            (RegionSuccessor::ParentResults(results), ScopeState::Exited),
        ]
    );
    assert_eq!(state, ScopeState::Exited);
    assert_eq!(ScopeState::Exited.advance(graph, scope), Ok(None));
}

#[test]
fn test_not_a_scope() {
    let mut builder = ScriptBuilder::new();
    let (_, body) = builder.sequence(&[]);
    let looped = builder.append(body, OperationKind::custom("test.loop"), &[], &[], 1);
    let loop_body = builder.graph.operation(looped).regions()[0];
    builder.yield_(loop_body, &[]);
    let graph = &builder.graph;

    let violation = Violation::structural(looped, ViolationKind::NotAScope);
    assert!(graph.operation(looped).region_branch().is_none());
    assert_eq!(ScopeOp::body(graph, looped), Err(violation.clone()));
    assert_eq!(ScopeOp::result_bindings(graph, looped), Err(violation.clone()));
    assert_eq!(ScopeOp.verify_structure(graph, looped), Some(violation.clone()));
    assert_eq!(ScopeOp.successors(graph, looped, None), Err(violation.clone()));
    assert_eq!(ScopeOp.successors(graph, looped, Some(7)), Err(violation.clone()));
    assert_eq!(ScopeState::Unentered.advance(graph, looped), Err(violation.clone()));
    assert_eq!(ScopeState::Body.advance(graph, looped), Err(violation));
}

#[test_case(Some(0); "body index")]
#[test_case(Some(7); "out of range index")]
fn test_any_origin_index_exits(from: Option<usize>) {
    let (builder, scope) = well_formed_scope();
    let graph = &builder.graph;
    let results = graph.operation(scope).results().to_vec();

    assert_eq!(
        ScopeOp.successors(graph, scope, from),
        Ok(vec![RegionSuccessor::ParentResults(results)])
    );
}
