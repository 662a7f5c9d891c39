//! Whole-table operation tests
//!
//! Differences, merges, extension, replacement and the set-like operations.

use std::cmp::Ordering;

use dotstore::{Container, Diff, Key, SortFlag, Value, list, table};

use crate::helpers::*;

fn case_insensitive(a: &Key, b: &Key) -> Ordering {
    a.to_text().to_lowercase().cmp(&b.to_text().to_lowercase())
}

// ===== DIFF =====

#[test]
fn test_diff_by_value() {
    let (store, other) = setup_fruit_diff();
    let diff = store.diff(Diff::Values, &[other]);

    assert_eq!(
        diff,
        table! { "a" => "green", "b" => "brown", "c" => "blue" }
    );
}

#[test]
fn test_diff_against_several_tables() {
    let (store, other) = setup_fruit_diff();
    let diff = store.diff(Diff::Values, &[other, list!["green", "blue"]]);
    assert_eq!(diff, table! { "b" => "brown" });
}

#[test]
fn test_diff_with_key_comparator() {
    let store = Container::from_table(table! { "Blue" => 1, "red" => 2, "GREEN" => 3 });
    let other = table! { "blue" => 9, "green" => 3 };

    assert_eq!(
        store.diff(Diff::KeysUsing(&case_insensitive), &[other.clone()]),
        table! { "red" => 2 }
    );
    assert_eq!(
        store.diff(Diff::AssocUsing(&case_insensitive), &[other]),
        table! { "Blue" => 1, "red" => 2 }
    );
}

#[test]
fn test_diff_named_modes() {
    let (store, other) = setup_fruit_diff();
    assert_eq!(store.diff_named("diff", None, &[other.clone()]).len(), 3);
    assert_eq!(
        store.diff_named("key", None, &[other.clone()]),
        table! { "a" => "green", "b" => "brown", "c" => "blue" }
    );
    assert!(store.diff_named("ukey", None, &[other.clone()]).is_empty());
    assert!(store.diff_named("sideways", None, &[other]).is_empty());
}

// ===== MERGE =====

#[test]
fn test_merge_renumbers_lists() {
    let store = Container::from_value(list!["html", "css"]);

    assert_eq!(store.merge(&[list!["js"]]), list!["html", "css", "js"]);
    assert_eq!(
        store.merge(&[list!["js"], list!["rust", "sql"]]),
        list!["html", "css", "js", "rust", "sql"]
    );
}

#[test]
fn test_merge_later_string_keys_win() {
    let store = Container::from_table(table! { "mode" => "dark", 7 => "x" });
    let merged = store.merge(&[table! { "mode" => "light", 3 => "y" }]);
    assert_eq!(merged, table! { "mode" => "light", 0 => "x", 1 => "y" });
}

#[test]
fn test_merge_recursive_collects_collisions() {
    let store = Container::from_table(table! {
        "color" => table! { "favorite" => "red" },
        "size" => 5,
    });
    let merged = store.merge_recursive(&[table! {
        "size" => 10,
        "color" => table! { "favorite" => "green", "alt" => "blue" },
    }]);

    assert_eq!(
        merged,
        table! {
            "color" => table! { "favorite" => list!["red", "green"], "alt" => "blue" },
            "size" => list![5, 10],
        }
    );
}

#[test]
fn test_merge_recursive_appends_integer_keys() {
    let store = Container::from_table(table! { "color" => table! { "favorite" => "red" }, 0 => 5 });
    let merged = store.merge_recursive(&[table! {
        0 => 10,
        "color" => table! { "favorite" => "green", 0 => "blue" },
    }]);

    assert_eq!(
        merged,
        table! {
            "color" => table! { "favorite" => list!["red", "green"], 0 => "blue" },
            0 => 5,
            1 => 10,
        }
    );
}

// ===== EXTEND / REPLACE =====

#[test]
fn test_extend_overrides_existing_keys_only() {
    let mut store = Container::from_table(table! {
        "system" => table! { "lang" => "en-US", "theme" => "auto" },
        "debug" => false,
    });
    store.extend(&table! {
        "system" => table! { "lang" => "es-VE" },
        "debug" => true,
        "extra" => "ignored",
    });

    assert_eq!(store.value("system.lang"), "es-VE");
    assert_eq!(store.value(["system", "lang"]), "es-VE");
    assert_eq!(store.value("system.theme"), "auto");
    assert_eq!(store.value("debug"), true);
    assert!(!store.has("extra"));
}

#[test]
fn test_replace_shallow() {
    let store = Container::from_value(list!["naranja", "plátano", "manzana", "frambuesa"]);
    let replaced = store.replace(
        false,
        &[
            table! { 0 => "piña", 4 => "cereza" },
            table! { 0 => "uva" },
        ],
    );

    assert_eq!(
        replaced,
        list!["uva", "plátano", "manzana", "frambuesa", "cereza"]
    );
}

#[test]
fn test_replace_recursive() {
    let store = Container::from_table(table! {
        "cítricos" => list!["naranja"],
        "bayas" => list!["mora", "frambuesa"],
    });
    let replaced = store.replace(true, &[table! {
        "cítricos" => list!["piña"],
        "bayas" => list!["arándano"],
    }]);

    assert_eq!(
        replaced,
        table! {
            "cítricos" => list!["piña"],
            "bayas" => list!["arándano", "frambuesa"],
        }
    );
    // Without recursion the nested list is replaced whole
    let shallow = store.replace(false, &[table! { "bayas" => list!["arándano"] }]);
    assert_eq!(
        shallow
            .get(&Key::from("bayas"))
            .and_then(|v| v.as_table())
            .map(|t| t.len()),
        Some(1)
    );
}

// ===== SET OPERATIONS =====

#[test]
fn test_union_keeps_receiver_keys() {
    let store = Container::from_value(list!["hello"]);
    let union = store.union(&table! { 5 => "world", 0 => "ignored" });
    assert_eq!(union.all(), &table! { 0 => "hello", 5 => "world" });
}

#[test]
fn test_intersections() {
    let store = Container::from_table(table! { 1 => "one", 2 => "two", 3 => "there" });

    let by_value = store.intersect(&table! { 1 => "one" });
    assert_eq!(by_value.all(), &table! { 1 => "one" });

    let by_key = store.intersect_by_keys(&table! { 2 => "anything", 3 => Value::Null });
    assert_keys(by_key.all(), &["2", "3"]);
}

#[test]
fn test_unique_keeps_first_occurrence() {
    let mut store = Container::from_table(table! {
        "a" => "verde", 0 => "rojo", "b" => "verde", 1 => "azul", 2 => "rojo",
    });
    store.unique(SortFlag::String);

    assert_eq!(store.count(), 3);
    assert_keys(store.all(), &["a", "0", "1"]);
}

#[test]
fn test_unique_flags() {
    let mut numeric = Container::from_value(list!["1", 1, "1.0", "01"]);
    numeric.unique(SortFlag::Numeric);
    assert_eq!(numeric.count(), 1);

    let mut textual = Container::from_value(list!["1", 1, "1.0", "01"]);
    textual.unique(SortFlag::String);
    assert_texts(textual.all(), &["1", "1.0", "01"]);
}
