use std::sync::mpsc;

use arbor_core::{Cell, Record};
use arbor_tree::{Tree, TreeEvent};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn nested_tree() -> Tree {
    let mut tree = Tree::document();
    let root = tree.root();
    let outer = tree
        .add_node(root, Record::container("outer").into_row(), None)
        .unwrap();
    let inner = tree
        .add_node(outer, Record::container("inner").into_row(), None)
        .unwrap();
    for key in ["a", "b", "c"] {
        tree.add_node(inner, Record::leaf(key, "", "1", "integer", "").into_row(), None)
            .unwrap();
    }
    tree.add_node(root, Record::leaf("top", "", "x", "string", "").into_row(), None)
        .unwrap();
    tree
}

fn assert_uniform(tree: &Tree) {
    let width = tree.column_count();
    for id in tree.descendants(tree.root()) {
        assert_eq!(tree.node(id).unwrap().width(), width, "node {id}");
    }
}

#[derive(Debug, Clone, Copy)]
enum ColumnOp {
    Insert(usize, usize),
    Remove(usize, usize),
}

#[rstest]
#[case::grow(&[ColumnOp::Insert(0, 1), ColumnOp::Insert(6, 3)])]
#[case::shrink(&[ColumnOp::Remove(4, 1), ColumnOp::Remove(0, 2)])]
#[case::mixed(&[ColumnOp::Insert(2, 2), ColumnOp::Remove(1, 4), ColumnOp::Insert(3, 1)])]
#[case::rejected(&[ColumnOp::Insert(9, 1), ColumnOp::Remove(3, 5), ColumnOp::Remove(usize::MAX, 2)])]
fn column_width_stays_uniform(#[case] ops: &[ColumnOp]) {
    let mut tree = nested_tree();
    for op in ops {
        match *op {
            ColumnOp::Insert(position, count) => tree.insert_columns(position, count),
            ColumnOp::Remove(position, count) => tree.remove_columns(position, count),
        };
        assert_uniform(&tree);
    }
}

#[rstest]
#[case::past_end(3, 1)]
#[case::overlong(1, 2)]
#[case::overflow(usize::MAX, 2)]
fn remove_out_of_bounds_leaves_children(#[case] position: usize, #[case] count: usize) {
    let mut tree = nested_tree();
    let inner = tree.find_path(&["outer", "inner"]).unwrap();
    let inner_children = tree.children(inner).to_vec();
    let root_children = tree.children(tree.root()).to_vec();
    let root = tree.root();

    assert!(!tree.remove_children(inner, position.saturating_add(1), count));
    assert!(!tree.remove_rows(root, position, count));

    assert_eq!(tree.children(inner), inner_children.as_slice());
    assert_eq!(tree.children(tree.root()), root_children.as_slice());
}

#[test]
fn insert_past_end_leaves_children() {
    let mut tree = nested_tree();
    let root = tree.root();
    let before = tree.children(root).to_vec();
    assert!(!tree.insert_children(root, 3, 1, 5));
    assert!(!tree.insert_rows(root, 3, 1));
    assert_eq!(tree.children(root), before.as_slice());
}

#[test]
fn rejected_changes_emit_nothing() {
    let mut tree = nested_tree();
    let (tx, rx) = mpsc::channel();
    tree.subscribe(tx);
    let root = tree.root();
    let top = tree.find_path(&["top"]).unwrap();

    assert!(!tree.insert_rows(root, 9, 1));
    assert!(!tree.remove_rows(root, 0, 9));
    assert!(!tree.insert_columns(9, 1));
    assert!(!tree.remove_columns(4, 2));
    assert!(!tree.set_value(top, 7, Cell::from("x")));

    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn column_events_bracket_the_change() {
    let mut tree = nested_tree();
    let (tx, rx) = mpsc::channel();
    tree.subscribe(tx);

    assert!(tree.insert_columns(5, 2));
    assert!(tree.remove_columns(5, 2));

    let events: Vec<TreeEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            TreeEvent::BeginInsertColumns { first: 5, last: 6 },
            TreeEvent::EndInsertColumns,
            TreeEvent::BeginRemoveColumns { first: 5, last: 6 },
            TreeEvent::EndRemoveColumns,
        ]
    );
}

#[test]
fn edit_emits_single_data_changed() {
    let mut tree = nested_tree();
    let (tx, rx) = mpsc::channel();
    tree.subscribe(tx);
    let a = tree.find_path(&["outer", "inner", "a"]).unwrap();

    tree.edit_value(a, "42").unwrap();
    assert!(tree.edit_value(a, "4.2").is_err());

    let events: Vec<TreeEvent> = rx.try_iter().collect();
    assert_eq!(events, vec![TreeEvent::DataChanged { node: a, column: 2 }]);
    assert_eq!(tree.value(a, 2), Some(&Cell::from("42")));
}
