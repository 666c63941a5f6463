//! Property-based tests for the normalization engine

use normcast_core::{normalize, NormalizerOptions};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Leaves that scalar coercion must pass through untouched
fn normalized_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
    ]
}

fn object_of(leaf: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", leaf, 0..8).prop_map(|fields| {
        Value::Object(Map::from_iter(fields))
    })
}

proptest! {
    /// With no overrides, normalize is the identity on non-string leaves.
    #[test]
    fn identity_on_already_normalized_input(input in object_of(normalized_leaf())) {
        let outcome = normalize(&input, NormalizerOptions::default()).unwrap();
        prop_assert_eq!(outcome.result, input);
        prop_assert!(outcome.errors.is_none());
    }

    /// Boolean strings coerce regardless of surrounding whitespace and case
    /// of the first normalization; numeric strings equal their mathematical
    /// value.
    #[test]
    fn whitespace_padded_scalars_round_trip(
        flag in any::<bool>(),
        n in any::<i64>(),
        pad_left in " {0,3}",
        pad_right in " {0,3}",
    ) {
        let input = serde_json::json!({
            "flag": format!("{pad_left}{flag}{pad_right}"),
            "n": format!("{pad_left}{n}{pad_right}"),
        });
        let outcome = normalize(&input, NormalizerOptions::default()).unwrap();
        prop_assert_eq!(&outcome.result["flag"], &Value::from(flag));
        prop_assert_eq!(&outcome.result["n"], &Value::from(n));
    }

    /// Normalizing a second time changes nothing: word-like strings stay
    /// strings, everything else left the string domain on the first pass.
    #[test]
    fn normalization_is_idempotent(
        input in object_of(prop_oneof![
            normalized_leaf(),
            "[a-z]{1,8}".prop_map(Value::from),
            any::<i64>().prop_map(|n| Value::from(format!(" {n} "))),
        ])
    ) {
        let once = normalize(&input, NormalizerOptions::default()).unwrap();
        let twice = normalize(&once.result, NormalizerOptions::default()).unwrap();
        prop_assert_eq!(twice.result, once.result);
    }
}
