#![allow(missing_docs)]

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{Value, json};
use tabsafe_normalize::{infer_columns, search, to_rows};

fn arbitrary_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn to_rows_is_total(raw in arbitrary_value()) {
        let rows = to_rows(&raw);
        for row in &rows {
            prop_assert!(!row.identity.is_empty());
        }
    }

    #[test]
    fn identities_are_pairwise_distinct(elements in prop::collection::vec(arbitrary_value(), 0..16)) {
        let rows = to_rows(&Value::Array(elements));
        let mut seen = HashSet::new();
        for row in &rows {
            prop_assert!(seen.insert(row.identity.clone()), "duplicate identity {}", row.identity);
        }
    }

    #[test]
    fn list_input_yields_one_row_per_element(elements in prop::collection::vec(arbitrary_value(), 0..16)) {
        let expected = elements.len();
        let rows = to_rows(&Value::Array(elements));
        prop_assert_eq!(rows.len(), expected);
    }

    #[test]
    fn inference_is_deterministic(raw in arbitrary_value()) {
        let first = infer_columns(&to_rows(&raw));
        let second = infer_columns(&to_rows(&raw));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn search_returns_an_order_preserving_subset(
        raw in arbitrary_value(),
        term in "[a-z]{0,4}",
    ) {
        let rows = to_rows(&raw);
        let hits = search(&rows, &term, &[]);
        prop_assert!(hits.len() <= rows.len());
        // Every hit appears in the original list, in the same relative order.
        let mut cursor = 0usize;
        for hit in &hits {
            let found = rows[cursor..].iter().position(|row| row == hit);
            prop_assert!(found.is_some(), "hit not found in input order");
            cursor += found.unwrap_or(0) + 1;
        }
    }
}
