#![cfg(feature = "value")]
//! Integration tests for dynamic keys, values and records flowing through
//! mapping operations, including the diagnostics they emit.

use std::io;
use std::sync::{Arc, Mutex};

use ordered_mapping::error::{KeyTypeError, MapperContractError, MappingError, RecursionLimitError};
use ordered_mapping::persistent::{Collation, OrderedMap, RecursiveFilter};
use ordered_mapping::typeclass::LooseCompare;
use ordered_mapping::value::{Key, Record, Value};
use ordered_mapping::{list, mapping};
use rstest::rstest;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Log Capture
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(operation: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("ordered_mapping=trace"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, operation);
    (result, logs.text())
}

// =============================================================================
// Keys
// =============================================================================

#[rstest]
#[case("12", Key::Int(12))]
#[case("-3", Key::Int(-3))]
#[case("012", Key::Str("012".to_string()))]
#[case("-0", Key::Str("-0".to_string()))]
#[case("1.5", Key::Str("1.5".to_string()))]
fn test_text_keys_normalize_canonical_integers(#[case] text: &str, #[case] expected: Key) {
    assert_eq!(Key::from(text), expected);
}

#[rstest]
fn test_normalized_keys_collide() {
    let row = mapping! { "7" => "text", 7 => "integer" };
    assert_eq!(row.len(), 1);
    assert_eq!(row.get(&Key::Int(7)), Some(&Value::from("integer")));
}

// =============================================================================
// Loose Semantics Through Operations
// =============================================================================

#[rstest]
fn test_max_and_min_use_loose_ordering() {
    let mapping = list![1, "5", 3, "-2"];
    assert_eq!(mapping.max(), Some(&Value::from("5")));
    assert_eq!(mapping.min(), Some(&Value::from("-2")));
}

#[rstest]
fn test_first_extreme_wins_ties() {
    let mapping = list![1, "1", 1.0];
    assert_eq!(mapping.max(), Some(&Value::Int(1)));
    assert_eq!(mapping.min(), Some(&Value::Int(1)));
}

#[rstest]
#[case(Collation::Text, list![1, "1.0", 1.5])]
#[case(Collation::Regular, list![1, 1.5])]
#[case(Collation::Numeric, list![1, 1.5])]
fn test_unique_collations(#[case] collation: Collation, #[case] expected: OrderedMap<Key, Value>) {
    let values = list![1, "1", "1.0", 1.5];
    let unique = values.unique(collation).values();
    assert_eq!(unique, expected);
}

#[rstest]
fn test_large_floats_collate_in_exponent_form() {
    let values = list![1e25, "1.0E+25", "10000000000000000000000000"];
    assert_eq!(
        values.unique(Collation::Text),
        mapping! { 0 => 1e25, 2 => "10000000000000000000000000" }
    );
    assert_eq!(values.diff(&[Value::from("1.0E+25")]), mapping! { 2 => "10000000000000000000000000" });
}

#[rstest]
fn test_diff_and_intersect_by_text() {
    let values = list![1, "1", 2, true];
    let others = [Value::from("1")];
    assert_eq!(values.diff(&others), mapping! { 2 => 2 });
    assert_eq!(values.intersect(&others), mapping! { 0 => 1, 1 => "1", 3 => true });
}

#[rstest]
fn test_replace_value_loose() {
    let values = list![0, "0", Value::Null, 1];
    let replaced = values.replace_value(&Value::Int(0), Value::from("zero"), Default::default());
    assert_eq!(replaced, list!["zero", "zero", "zero", 1]);
}

#[rstest]
fn test_average_coerces_texts() {
    assert!((list![1, "2", "x"].average() - 1.0).abs() < f64::EPSILON);
}

// =============================================================================
// Records
// =============================================================================

#[rstest]
fn test_column_on_records_skips_other_shapes() {
    let rows = list![
        Record::new("User", [("id", Value::Int(1))]),
        Record::new("User", [("name", Value::from("x"))]),
        mapping! { "id" => 9 },
        Record::new("Admin", [("id", Value::Int(2))]),
    ];
    assert_eq!(rows.column(&Key::from("id")), list![1, 2]);
}

#[rstest]
fn test_column_on_mappings() {
    let rows = list![
        mapping! { "id" => 3, "name" => "c" },
        mapping! { "name" => "d" },
        mapping! { "id" => 4 },
    ];
    assert_eq!(rows.column(&Key::from("id")), list![3, 4]);
    assert!(list![1, 2].column(&Key::from("id")).is_empty());
}

#[rstest]
fn test_records_are_leaves_of_recursive_operations() {
    let user = Record::new("User", [("tags", Value::from(list!["a"]))]);
    let nested = list![list![1], user.clone()];
    assert_eq!(nested.values_flat(), list![1, user]);
}

#[rstest]
fn test_records_compare_loosely_by_name_and_fields() {
    let left = Value::record("P", [("x", Value::Int(1))]);
    let right = Value::record("P", [("x", Value::from("1"))]);
    let other = Value::record("Q", [("x", Value::Int(1))]);
    assert!(left.loose_eq(&right));
    assert!(!left.loose_eq(&other));
    assert_ne!(left, right);
}

// =============================================================================
// Structural Operations
// =============================================================================

#[rstest]
fn test_merge_values_concatenates_one_level() {
    let nested = list![list![1, 2], mapping! { "k" => list![3] }, 4];
    assert_eq!(
        nested.merge_values(),
        mapping! { 0 => 1, 1 => 2, "k" => list![3], 2 => 4 }
    );
}

#[rstest]
fn test_flip_and_values_to_keys() {
    let mapping = mapping! { "a" => "x", "b" => 2, "c" => "x" };
    let flipped: OrderedMap<Key, Key> = mapping.flip().unwrap();
    assert_eq!(
        flipped.entries(),
        vec![(Key::from("x"), Key::from("c")), (Key::Int(2), Key::from("b"))]
    );

    let keyed: OrderedMap<Key, Value> = mapping.values_to_keys(Value::Null).unwrap();
    assert_eq!(keyed, mapping! { "x" => Value::Null, 2 => Value::Null });
}

#[rstest]
fn test_filter_recursive_with_options() {
    let nested = mapping! {
        "keep" => 1,
        "empty" => mapping! { "gone" => 0 },
        "deep" => mapping! { "inner" => mapping! { "value" => 2 } },
    };
    let options = RecursiveFilter::new().remove_empty_containers(true);
    let filtered = nested
        .filter_recursive_with(&options, |_, value| ordered_mapping::typeclass::is_truthy(value))
        .unwrap();
    assert_eq!(
        filtered,
        mapping! {
            "keep" => 1,
            "deep" => mapping! { "inner" => mapping! { "value" => 2 } },
        }
    );

    let limited = nested.filter_recursive_with(&RecursiveFilter::new().max_depth(1), |_, _| true);
    assert_eq!(
        limited,
        Err(MappingError::from(RecursionLimitError { limit: 1 }))
    );
}

#[rstest]
fn test_values_flat_bounded() {
    let nested = list![list![list![1]]];
    assert_eq!(nested.values_flat_bounded(2), Ok(list![1]));
    assert_eq!(
        nested.values_flat_bounded(1),
        Err(RecursionLimitError { limit: 1 })
    );
}

// =============================================================================
// Errors and Diagnostics
// =============================================================================

#[rstest]
fn test_mapper_contract_violation_reports_position() {
    let mapping = list!["a", "b"];
    let result: Result<OrderedMap<Key, Value>, _> = mapping.map_key_value(|key, value| {
        if *key == Key::Int(1) {
            Value::from(list![value.clone()])
        } else {
            Value::from(list![value.clone(), 1])
        }
    });
    assert_eq!(
        result,
        Err(MappingError::from(MapperContractError::new(
            1,
            "a mapping of 1 entries"
        )))
    );
}

#[rstest]
fn test_flip_failure_is_logged_before_returning() {
    let (result, logs) = with_captured_logs(|| list!["a", 1.5].flip::<Key>());
    assert_eq!(
        result,
        Err(MappingError::from(KeyTypeError::new("flip", 1, "float")))
    );
    assert!(logs.contains("value cannot be used as a key"), "{logs}");
    assert!(logs.contains("flip"), "{logs}");
    assert!(logs.contains("float"), "{logs}");
}

#[rstest]
fn test_refused_push_is_logged() {
    let row = mapping! { i64::MAX => "last" };
    let (pushed, logs) = with_captured_logs(|| row.push(Value::from("next")));
    assert_eq!(pushed, row);
    assert!(logs.contains("push refused"), "{logs}");
    assert!(logs.contains("WARN"), "{logs}");
}

#[rstest]
fn test_skipped_rows_are_traced() {
    let rows = list![mapping! { "id" => 1 }, mapping! { "name" => "x" }];
    let (ids, logs) = with_captured_logs(|| rows.column(&Key::from("id")));
    assert_eq!(ids, list![1]);
    assert!(logs.contains("column skips a row without the field"), "{logs}");
}

#[rstest]
fn test_error_messages() {
    assert_eq!(
        MappingError::from(MapperContractError::new(3, "int")).to_string(),
        "mapper result at position 3 must be a [key, value] pair, found int"
    );
    assert_eq!(
        RecursionLimitError { limit: 4 }.to_string(),
        "nesting exceeds the recursion limit of 4"
    );
}
