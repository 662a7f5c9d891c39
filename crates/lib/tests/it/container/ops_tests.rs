//! Everyday operation tests
//!
//! Building, querying and reshaping tables, and the operations that change
//! a container in place.

use dotstore::{Container, Key, Value, list, table};

use crate::helpers::*;

// ===== BUILDING =====

#[test]
fn test_fill_and_fill_keys() {
    assert_eq!(
        Container::fill(0, 3, "text").unwrap(),
        list!["text", "text", "text"]
    );
    assert_eq!(Container::fill(5, 2, 0).unwrap(), table! { 5 => 0, 6 => 0 });
    assert_eq!(Container::fill(-2, 0, 0).unwrap(), table! {});
    assert_eq!(
        Container::fill_keys(["has", "have"], true),
        table! { "has" => true, "have" => true }
    );
}

#[test]
fn test_fill_at_the_integer_limit() {
    assert_eq!(
        Container::fill(i64::MAX, 1, "last").unwrap(),
        table! { i64::MAX => "last" }
    );
    assert!(Container::fill(i64::MAX, 0, "none").unwrap().is_empty());

    let err = Container::fill(i64::MAX, 2, Value::Null).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.operation(), Some("fill"));
    assert!(Container::fill(i64::MAX - 1, 3, 0).is_err());
}

#[test]
fn test_wrap() {
    assert_eq!(Container::wrap("alone"), list!["alone"]);
    assert!(Container::wrap(Value::Null).is_empty());
    assert_eq!(Container::wrap(list![1, 2]), list![1, 2]);
}

// ===== QUERYING =====

#[test]
fn test_first_last_and_keys() {
    let store = Container::from_table(table! { "fruta" => "mango", "color" => "rojo" });

    assert_eq!(store.first(), Some(&Value::from("mango")));
    assert_eq!(store.last(), Some(&Value::from("rojo")));
    assert_eq!(store.keys(), vec![Key::from("fruta"), Key::from("color")]);
    assert_eq!(store.values(), list!["mango", "rojo"]);
    assert!(Container::new().first().is_none());
}

#[test]
fn test_count_values() {
    let store = Container::from_value(list![1, "hello", 1, "world", "hello", 1.5]);
    assert_eq!(
        store.count_values(),
        table! { 1 => 2, "hello" => 2, "world" => 1 }
    );
}

#[test]
fn test_search_and_contains() {
    let store = Container::from_table(table! { 1 => "one", 2 => "two", 3 => "there", 4 => "7" });

    assert_eq!(store.search("two", false), Some(Key::Int(2)));
    assert_eq!(store.search_keys("one", false), vec![Key::Int(1)]);
    assert_eq!(store.search(7, false), Some(Key::Int(4)));
    assert_eq!(store.search(7, true), None);
    assert!(store.contains("7", true));
    assert!(!store.contains("four", false));
}

// ===== RESHAPING =====

#[test]
fn test_chunk() {
    let store = Container::from_table(table! { "a" => 1, "b" => 2, "c" => 3 });

    assert_eq!(store.chunk(2, false).unwrap(), list![list![1, 2], list![3]]);
    assert_eq!(
        store.chunk(2, true).unwrap(),
        list![table! { "a" => 1, "b" => 2 }, table! { "c" => 3 }]
    );
    assert_eq!(store.chunk(1, false).unwrap().len(), 3);

    let err = store.chunk(0, false).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.operation(), Some("chunk"));
}

#[test]
fn test_column() {
    let store = Container::from_value(list![
        table! { "id" => 512, "name" => "jhon doe" },
        table! { "id" => 513, "name" => "pedro perez" },
        table! { "id" => 514 },
        "not a row",
    ]);
    let name = Key::from("name");
    let id = Key::from("id");

    assert_eq!(
        store.column(Some(&name), Some(&id)),
        table! { 512 => "jhon doe", 513 => "pedro perez" }
    );
    assert_eq!(
        store.column(Some(&name), None),
        list!["jhon doe", "pedro perez"]
    );
    assert_eq!(store.column(None, Some(&id)).len(), 3);
}

#[test]
fn test_combine_and_divide() {
    let colors = Container::from_value(list!["green", "red", "yellow"]);
    let combined = colors.combine(&list!["avocado", "apple", "banana"]).unwrap();
    assert_eq!(
        combined,
        table! { "green" => "avocado", "red" => "apple", "yellow" => "banana" }
    );

    let (keys, values) = Container::from_table(combined).divide();
    assert_eq!(keys, list!["green", "red", "yellow"]);
    assert_eq!(values, list!["avocado", "apple", "banana"]);
}

#[test]
fn test_combine_rejects_bad_input() {
    let colors = Container::from_value(list!["green", "red"]);
    assert!(
        colors
            .combine(&list!["avocado"])
            .unwrap_err()
            .is_invalid_argument()
    );

    let nested = Container::from_value(list![list!["x"], "red"]);
    assert!(nested.combine(&list!["a", "b"]).unwrap_err().is_type_error());
}

#[test]
fn test_filter_and_flip() {
    let store = Container::from_table(table! { "a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5 });
    let odd = store.filter(|_, value| value.as_int().is_some_and(|n| (n & 1) == 1));
    assert_eq!(odd, table! { "a" => 1, "c" => 3, "e" => 5 });

    let sparse = Container::from_value(list!["not_null", Value::Null]);
    assert_eq!(sparse.filter_not_null(), list!["not_null"]);

    let words = Container::from_table(table! { "fruta" => "mango", "color" => "rojo" });
    assert_eq!(
        words.flip(),
        table! { "mango" => "fruta", "rojo" => "color" }
    );
}

#[test]
fn test_map_only_and_except() {
    let store = Container::from_table(table! { 1 => "one", 2 => "two", 3 => "there" });

    let pairs = store.map(|key, value| Value::from(list![value.clone(), Value::from(key.clone())]));
    assert_eq!(pairs.get(&Key::Int(1)), Some(&Value::from(list!["one", 1])));

    let cubes = Container::from_value(list![1, 2, 3])
        .map(|_, n| Value::from(n.as_int().unwrap_or(0).pow(3)));
    assert_eq!(cubes, list![1, 8, 27]);

    assert_keys(&store.only([1, 3]), &["1", "3"]);
    assert_keys(&store.except([Key::Int(2)].to_vec()), &["1", "3"]);
    // The receiver keeps every entry
    assert_eq!(store.count(), 3);
}

#[test]
fn test_join() {
    let fields = Container::from_value(list!["lastname", "email", "phone"]);

    assert_eq!(fields.join(", ", ""), "lastname, email, phone");
    assert_eq!(fields.join(", ", " and "), "lastname, email and phone");
    assert_eq!(Container::new().join(", ", " and "), "");
    assert_eq!(
        Container::from_value(list!["oneKey"]).join(", ", " and "),
        "oneKey"
    );
}

#[test]
fn test_pad_both_sides() {
    let store = Container::from_value(list![12, 10, 1]);

    assert_eq!(store.pad(4, 0), list![12, 10, 1, 0]);
    assert_eq!(store.pad(-5, 0), list![0, 0, 12, 10, 1]);
    assert_eq!(store.pad(2, 0), list![12, 10, 1]);
}

#[test]
fn test_reverse() {
    let store = Container::from_table(table! { 0 => "naranja", 1 => "plátano", "x" => "manzana" });

    assert_eq!(
        store.reverse(false),
        table! { "x" => "manzana", 0 => "plátano", 1 => "naranja" }
    );
    assert_eq!(
        store.reverse(true),
        table! { "x" => "manzana", 1 => "plátano", 0 => "naranja" }
    );
}

// ===== MUTATING =====

#[test]
fn test_push_and_pull() {
    let mut store = Container::from_value(list![12, 10, 1]);
    assert_eq!(store.push([0]), 4);
    assert_eq!(store.all(), &list![12, 10, 1, 0]);

    let mut store = Container::from_value(list![12, 10, 1]);
    assert_eq!(store.pull(2, Value::Null), 1);
    assert_eq!(store.all(), &list![12, 10]);
    assert_eq!(store.pull("missing", "gone"), "gone");
}

#[test]
fn test_prepend() {
    let mut store = Container::from_value(list!["orange", "banana"]);
    store.prepend("apple");
    assert_eq!(store.all(), &list!["apple", "orange", "banana"]);

    let mut keyed = Container::from_value(list!["orange", "banana"]);
    keyed.prepend_with_key("manzana", "apple");
    assert_keys(keyed.all(), &["manzana", "0", "1"]);
    assert_eq!(keyed.value("manzana"), "apple");
}

#[test]
fn test_shuffle_with_seed_is_reproducible() {
    let mut first = Container::from_table(table! {
        "a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5
    });
    let mut second = first.clone();

    let shuffled = first.shuffle(Some(42)).clone();
    assert_eq!(&shuffled, second.shuffle(Some(42)));
    assert!(shuffled.is_list());

    let mut values: Vec<i64> = shuffled.values().filter_map(Value::as_int).collect();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
}
