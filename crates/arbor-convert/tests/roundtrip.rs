use std::path::{Path, PathBuf};
use std::sync::mpsc;

use arbor_convert::{
    ConvertError, IssueKind, KEY_ERROR_TITLE, VALUE_ERROR_TITLE, flatten_tree, materialize,
    materialize_document,
};
use arbor_core::{Cell, Record, decode};
use arbor_schema::{MetadataMap, blank_document};
use arbor_tree::{Tree, TreeEvent};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn instrument_meta() -> MetadataMap {
    MetadataMap::from_schema(&decode(&fixture("instrument.schema.json")).unwrap()).unwrap()
}

#[test]
fn conforming_document_roundtrips() {
    let document = decode(&fixture("instrument.json")).unwrap();
    let built = materialize_document(&document, &instrument_meta()).unwrap();
    assert!(built.issues.is_empty());
    assert_eq!(flatten_tree(&built.tree).unwrap(), document);
}

#[test]
fn blank_document_roundtrips() {
    let schema = decode(&fixture("instrument.schema.json")).unwrap();
    let blank = blank_document(&schema).unwrap();
    let built = materialize_document(&blank, &instrument_meta()).unwrap();
    assert_eq!(flatten_tree(&built.tree).unwrap(), blank);
}

#[test]
fn count_scenario_end_to_end() {
    let schema = json!({
        "properties": {"count": {"type": "integer", "title": "Count", "description": "d"}}
    });
    let blank = blank_document(&schema).unwrap();
    assert_eq!(blank, json!({"count": 0}));

    let meta = MetadataMap::from_schema(&schema).unwrap();
    let mut built = materialize_document(&blank, &meta).unwrap();
    let count = built.tree.find_path(&["count"]).unwrap();
    assert_eq!(
        built.tree.node(count).unwrap().row(),
        Record::leaf("count", "Count", "0", "integer", "d")
            .into_row()
            .as_slice()
    );

    built.tree.edit_value(count, "5").unwrap();
    assert_eq!(flatten_tree(&built.tree).unwrap(), json!({"count": 5}));
}

#[test]
fn drifted_document_keeps_every_key() {
    let document = decode(&fixture("instrument_drifted.json")).unwrap();
    let built = materialize_document(&document, &instrument_meta()).unwrap();
    let tree = &built.tree;

    let title = |path: &[&str]| {
        let id = tree.find_path(path).unwrap();
        tree.node(id).unwrap().record().unwrap().title
    };
    assert_eq!(title(&["name"]), "Name");
    assert_eq!(title(&["serial"]), KEY_ERROR_TITLE);
    assert_eq!(title(&["location"]), VALUE_ERROR_TITLE);
    assert_eq!(title(&["calibration"]), KEY_ERROR_TITLE);
    assert_eq!(title(&["calibration", "offset"]), KEY_ERROR_TITLE);

    let kinds: Vec<(&str, IssueKind)> = built
        .issues
        .iter()
        .map(|issue| (issue.path.as_str(), issue.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("serial", IssueKind::KeyMissing),
            ("location", IssueKind::StructuralMismatch),
            ("calibration", IssueKind::KeyMissing),
            ("calibration/date", IssueKind::KeyMissing),
            ("calibration/offset", IssueKind::KeyMissing),
        ]
    );

    // error rows are typed as strings, so the numeric offset comes back as text
    let flattened = flatten_tree(tree).unwrap();
    assert_eq!(flattened["calibration"]["offset"], json!("0.01"));
    assert_eq!(flattened["channels"], json!(8));
}

#[test]
fn unchecked_set_is_rejected_at_flatten() {
    let document = decode(&fixture("instrument.json")).unwrap();
    let mut built = materialize_document(&document, &instrument_meta()).unwrap();
    let floor = built.tree.find_path(&["location", "floor"]).unwrap();

    assert!(built.tree.edit_value(floor, "third").is_err());
    assert!(built.tree.set_value(floor, 2, Cell::from("third")));

    let error = flatten_tree(&built.tree).unwrap_err();
    assert!(matches!(error, ConvertError::Coercion { ref path, .. } if path == "location/floor"));
}

#[test]
fn splicing_reports_one_insert_per_level() {
    let document = json!({"location": {"lab": "B12", "floor": 3}, "name": "x"});
    let mut tree = Tree::document();
    let (tx, rx) = mpsc::channel();
    tree.subscribe(tx);
    materialize(document.as_object().unwrap(), &instrument_meta(), &mut tree).unwrap();

    let root = tree.root();
    let location = tree.find_path(&["location"]).unwrap();
    let events: Vec<TreeEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            TreeEvent::BeginInsertRows { parent: root, first: 0, last: 0 },
            TreeEvent::EndInsertRows,
            TreeEvent::BeginInsertRows { parent: location, first: 0, last: 1 },
            TreeEvent::EndInsertRows,
            TreeEvent::BeginInsertRows { parent: root, first: 1, last: 1 },
            TreeEvent::EndInsertRows,
        ]
    );
    for child in tree.children(location) {
        assert_eq!(tree.parent(*child), Some(location));
    }
}

#[test]
fn array_items_roundtrip_through_children() {
    let document = json!({"modes": ["single", "stream"]});
    let built = materialize_document(&document, &instrument_meta()).unwrap();
    let modes = built.tree.find_path(&["modes"]).unwrap();
    assert_eq!(built.tree.child_count(modes), 2);
    assert_eq!(
        built.tree.value(modes, 2),
        Some(&Cell::from("single, stream"))
    );
    assert_eq!(flatten_tree(&built.tree).unwrap(), document);
}

#[test]
fn array_edits_go_through_item_rows() {
    let document = json!({"modes": ["single", "stream"]});
    let mut built = materialize_document(&document, &instrument_meta()).unwrap();
    let modes = built.tree.find_path(&["modes"]).unwrap();

    assert!(matches!(
        built.tree.edit_value(modes, "burst"),
        Err(arbor_tree::TreeError::HasChildren { .. })
    ));
    assert_eq!(flatten_tree(&built.tree).unwrap(), document);

    let second = built.tree.find_path(&["modes", "1"]).unwrap();
    built.tree.edit_value(second, "burst").unwrap();
    assert_eq!(
        flatten_tree(&built.tree).unwrap(),
        json!({"modes": ["single", "burst"]})
    );
}
