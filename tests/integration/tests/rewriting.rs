//! Rewriting parsed calculator programs with visitor chains.

mod common;

use std::collections::HashMap;

use arbor_tree::{
    FnVisitor, NodeRef, NodeTraverser, Operation, TraversalError, TraverserConfig, Visitor,
};
use common::{Binary, Let, Name, Number, Program, number, parse, render};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Replaces operations on two literals with their result.
#[derive(Default)]
struct ConstantFolder {
    folded: usize,
}

impl Visitor for ConstantFolder {
    fn leave(&mut self, node: &NodeRef, _sequence: usize) -> Option<Operation> {
        let value = {
            let binary = node.downcast_ref::<Binary>()?;
            let left = binary.left.as_ref()?.downcast_ref::<Number>()?.0;
            let right = binary.right.as_ref()?.downcast_ref::<Number>()?.0;
            match binary.op {
                '+' => left.checked_add(right),
                '-' => left.checked_sub(right),
                '*' => left.checked_mul(right),
                '/' => left.checked_div(right),
                _ => None,
            }
        }?;

        self.folded += 1;
        Some(Operation::replace(number(value)))
    }
}

/// Substitutes names bound to literals by earlier `let` statements.
#[derive(Default)]
struct Inliner {
    bindings: HashMap<String, i64>,
}

impl Visitor for Inliner {
    fn enter(&mut self, node: &NodeRef, _sequence: usize) -> Option<Operation> {
        let value = *self.bindings.get(&node.downcast_ref::<Name>()?.0)?;
        Some(Operation::replace(number(value)))
    }

    fn leave(&mut self, node: &NodeRef, _sequence: usize) -> Option<Operation> {
        let statement = node.downcast_ref::<Let>()?;
        if let Some(value) = statement
            .value
            .as_ref()
            .and_then(|value| value.downcast_ref::<Number>().map(|n| n.0))
        {
            self.bindings.insert(statement.name.clone(), value);
        }
        None
    }
}

/// Drops every `let` statement.
struct DropBindings;

impl Visitor for DropBindings {
    fn enter(&mut self, node: &NodeRef, _sequence: usize) -> Option<Operation> {
        node.is::<Let>().then_some(Operation::Remove)
    }
}

fn statements(program: &NodeRef) -> usize {
    program.downcast_ref::<Program>().unwrap().body.len()
}

#[rstest]
#[case::single("1 + 2 * 3", "7")]
#[case::groups("(1 + 2) * (3 + 4)", "21")]
#[case::partial("x * (2 + 3)", "(x * 5)")]
#[case::division_by_zero("4 / (2 - 2)", "(4 / 0)")]
#[case::per_statement("1 + 1; 2 * 2", "2; 4")]
fn folds_constants(#[case] source: &str, #[case] expected: &str) {
    let program = parse(source);

    let mut traverser = NodeTraverser::new();
    traverser.add_visitor(ConstantFolder::default());
    let result = traverser.traverse(&program).unwrap();

    assert!(NodeRef::ptr_eq(&result, &program));
    assert_eq!(render(&program), expected);
}

#[test]
fn inlines_and_folds_in_one_pass() {
    let program = parse("let x = 2 * 3; let y = x + 1; x * y");
    let mut folder = ConstantFolder::default();

    {
        let mut traverser = NodeTraverser::new();
        traverser
            .add_visitor(Inliner::default())
            .add_visitor(&mut folder);
        traverser.traverse(&program).unwrap();
    }

    assert_eq!(render(&program), "let x = 6; let y = 7; 42");
    assert_eq!(folder.folded, 3);
}

#[test]
fn removes_statements_from_the_body() {
    let program = parse("let x = 2; let y = 3; x * y");

    let mut traverser = NodeTraverser::with_visitors([
        Box::new(Inliner::default()) as Box<dyn Visitor>,
        Box::new(ConstantFolder::default()),
    ]);
    traverser.traverse(&program).unwrap();
    assert_eq!(render(&program), "let x = 2; let y = 3; 6");

    NodeTraverser::with_visitors([DropBindings])
        .traverse(&program)
        .unwrap();
    assert_eq!(render(&program), "6");
    assert_eq!(statements(&program), 1);

    let program_ref = program.downcast_ref::<Program>().unwrap();
    assert_eq!(program_ref.body.capacity_used(), 3);
    program_ref.body.compact();
    assert_eq!(program_ref.body.capacity_used(), 1);
}

#[test]
fn removed_statements_are_not_inlined() {
    let program = parse("let x = 2; x + 1");

    let mut traverser = NodeTraverser::new();
    traverser
        .add_visitor(DropBindings)
        .add_visitor(Inliner::default())
        .add_visitor(ConstantFolder::default());
    traverser.traverse(&program).unwrap();

    assert_eq!(render(&program), "(x + 1)");
}

#[test]
fn sequences_follow_slots() {
    let program = parse("let x = 1; 2 + x");
    let mut seen = Vec::new();

    NodeTraverser::with_visitors([FnVisitor::new().on_enter(|node, sequence| {
        seen.push(format!("{}@{}", node.kind(), sequence));
        None
    })])
    .traverse(&program)
    .unwrap();

    assert_eq!(
        seen,
        vec![
            "program@0",
            "let@0",
            "number@0",
            "binary@1",
            "number@0",
            "name@1",
        ]
    );
}

#[test]
fn stop_keeps_earlier_rewrites() {
    let program = parse("1 + 2; x; 3 * 4");
    let mut entered = Vec::new();

    {
        let mut traverser = NodeTraverser::new();
        traverser
            .add_visitor(ConstantFolder::default())
            .add_visitor(FnVisitor::new().on_enter(|node, _| {
                entered.push(node.kind());
                node.is::<Name>().then_some(Operation::Stop)
            }));
        traverser.traverse(&program).unwrap();
    }

    assert_eq!(
        entered,
        vec!["program", "binary", "number", "number", "name"]
    );
    assert_eq!(render(&program), "3; x; (3 * 4)");
}

#[test]
fn skip_children_keeps_subtree() {
    let program = parse("(1 + 2) * (3 + 4 * 5)");

    let mut traverser = NodeTraverser::new();
    traverser
        .add_visitor(FnVisitor::new().on_enter(|node, sequence| {
            (node.is::<Binary>() && sequence == 1).then_some(Operation::SkipChildren)
        }))
        .add_visitor(ConstantFolder::default());
    traverser.traverse(&program).unwrap();

    assert_eq!(render(&program), "(3 * (3 + (4 * 5)))");
}

#[test]
fn replacing_the_root() {
    let program = parse("1");

    let result = NodeTraverser::with_visitors([FnVisitor::new().on_leave(|node, _| {
        node.is::<Program>()
            .then(|| Operation::replace(number(0)))
    })])
    .traverse(&program)
    .unwrap();

    assert_eq!(render(&result), "0");
    assert_eq!(render(&program), "1");
}

#[test]
fn depth_limit() {
    let program = parse("1 + 2 * 3");

    let err = NodeTraverser::with_visitors([ConstantFolder::default()])
        .with_config(TraverserConfig::new().with_max_depth(2))
        .traverse(&program)
        .unwrap_err();

    assert!(matches!(err, TraversalError::DepthExceeded { limit: 2, .. }));
    assert_eq!(err.node().unwrap().kind(), "number");
}
