//! Sorting tests
//!
//! Value and key sorts, their flags, and caller comparators.

use std::cmp::Ordering;

use dotstore::{Container, Key, SortFlag, Value, list, table};

use crate::helpers::*;

/// Orders words ignoring a leading Spanish article and letter case
fn without_article(a: &Key, b: &Key) -> Ordering {
    fn strip(key: &Key) -> String {
        let text = key.to_text();
        let bare = ["una ", "un ", "la "]
            .iter()
            .find_map(|article| text.strip_prefix(article))
            .unwrap_or(text.as_str());
        bare.to_lowercase()
    }
    strip(a).cmp(&strip(b))
}

#[test]
fn test_sort_values_ascending() {
    let sorted = setup_numbers().sort(SortFlag::Regular).unwrap();
    assert_keys(sorted.all(), &["d", "h", "c", "e", "g", "a", "f", "b"]);
    assert_eq!(sorted.first(), Some(&Value::Int(-9)));
}

#[test]
fn test_sort_values_descending() {
    let store = setup_numbers();
    let by_comparator = store.sort_by(|a, b| b.as_int().cmp(&a.as_int()));
    assert_keys(
        by_comparator.all(),
        &["b", "f", "a", "g", "e", "c", "h", "d"],
    );

    let descending = store.sort_desc(SortFlag::Regular).unwrap();
    assert_eq!(descending, by_comparator);
}

#[test]
fn test_sort_keys_both_ways() {
    let store = setup_numbers().sort(SortFlag::Regular).unwrap();

    assert_keys(
        store.sort_keys(SortFlag::Regular, false).all(),
        &["a", "b", "c", "d", "e", "f", "g", "h"],
    );
    assert_keys(
        store.sort_keys_desc(SortFlag::Regular).all(),
        &["h", "g", "f", "e", "d", "c", "b", "a"],
    );
}

#[test]
fn test_sort_keys_mixed_kinds() {
    let store = Container::from_table(table! { 10 => "ten", 2 => "two", "b" => "bee" });
    assert_keys(
        store.sort_keys(SortFlag::Numeric, false).all(),
        &["b", "2", "10"],
    );
    assert_keys(
        store.sort_keys(SortFlag::String, false).all(),
        &["10", "2", "b"],
    );
}

#[test]
fn test_sort_keys_using_comparator() {
    let store = Container::from_table(table! {
        "Víctor" => 1,
        "la Tierra" => 2,
        "una manzana" => 3,
        "un plátano" => 4,
    });
    let sorted = store.sort_keys_using(without_article);

    assert_keys(
        sorted.all(),
        &["una manzana", "un plátano", "la Tierra", "Víctor"],
    );
    assert_eq!(sorted.value("la Tierra"), 2);
}

#[test]
fn test_sort_does_not_touch_receiver() {
    let store = setup_numbers();
    let _ = store.sort(SortFlag::Regular).unwrap();
    let _ = store.sort_keys_desc(SortFlag::String);
    assert_eq!(store, setup_numbers());
}

#[test]
fn test_sort_numeric_strings() {
    let store = Container::from_value(list!["10", "9", "2", "1.5"]);
    assert_texts(
        store.sort(SortFlag::Regular).unwrap().all(),
        &["1.5", "2", "9", "10"],
    );
    assert_texts(
        store.sort(SortFlag::String).unwrap().all(),
        &["1.5", "10", "2", "9"],
    );
}

#[test]
fn test_sort_rejects_tables_with_scalars() {
    let store = Container::from_table(table! { "a" => 1, "b" => list![2, 3] });

    let err = store.sort(SortFlag::Regular).unwrap_err();
    assert!(err.is_invalid_argument());
    let err: dotstore::Error = store.sort_desc(SortFlag::Numeric).unwrap_err().into();
    assert!(err.is_invalid_argument());
    assert_eq!(err.module(), "container");
}
