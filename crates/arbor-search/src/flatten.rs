//! Flattening a nested document into one searchable map.
//!
//! Nested objects contribute their keys directly, without a prefix. A key that
//! is already taken gets the first free numeric suffix (`key`, `key0`,
//! `key1`, ...). Non-object array elements are stored as `key0`, `key1`, ...
//! in order, replacing any entry of the same name; objects inside arrays are
//! skipped and do not use up a number.

use serde_json::{Map, Value};

/// Flat view of `document`. Non-object documents flatten to an empty map.
#[must_use]
pub fn flatten_for_search(document: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    if let Value::Object(map) = document {
        collect(map, &mut flat);
    }
    flat
}

fn collect(map: &Map<String, Value>, flat: &mut Map<String, Value>) {
    for (key, value) in map {
        match value {
            Value::Object(nested) => collect(nested, flat),
            Value::Array(items) => {
                let elements = items.iter().filter(|item| !item.is_object());
                for (number, element) in elements.enumerate() {
                    flat.insert(format!("{key}{number}"), element.clone());
                }
            }
            other => insert_unique(flat, key, other.clone()),
        }
    }
}

fn insert_unique(flat: &mut Map<String, Value>, base: &str, value: Value) {
    let mut name = base.to_string();
    let mut suffix = 0_usize;
    while flat.contains_key(&name) {
        name = format!("{base}{suffix}");
        suffix += 1;
    }
    flat.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::distinct(json!({"a": {"b": 1, "c": 1}}), json!({"b": 1, "c": 1}))]
    #[case::collision(json!({"a": {"x": 1}, "b": {"x": 2}}), json!({"x": 1, "x0": 2}))]
    #[case::triple(
        json!({"x": 0, "a": {"x": 1}, "b": {"x": 2}}),
        json!({"x": 0, "x0": 1, "x1": 2})
    )]
    #[case::falsy_values_still_count(
        json!({"x": false, "a": {"x": ""}}),
        json!({"x": false, "x0": ""})
    )]
    #[case::array(json!({"tags": ["a", "b"]}), json!({"tags0": "a", "tags1": "b"}))]
    #[case::array_of_objects(json!({"people": [{"name": "a"}, {"name": "b"}]}), json!({}))]
    #[case::objects_in_arrays_leave_no_gap(
        json!({"tags": ["a", {"k": 1}, "b"]}),
        json!({"tags0": "a", "tags1": "b"})
    )]
    #[case::not_an_object(json!([1, 2]), json!({}))]
    fn flattens(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(Value::Object(flatten_for_search(&input)), expected);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = json!({"a": {"x": 1}});
        let copy = input.clone();
        let _ = flatten_for_search(&input);
        assert_eq!(input, copy);
    }
}
