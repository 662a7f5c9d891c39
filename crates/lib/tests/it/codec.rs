//! JSON codec integration tests

use dotstore::{
    Value,
    codec::{CodecError, json},
    list, table,
};

use crate::helpers::*;

#[test]
fn test_decode_keeps_document_order() {
    let store = json::decode_str(r#"{"zeta": 1, "alpha": {"b": 2, "a": 1}, "list": [3, 2, 1]}"#)
        .unwrap();

    assert_keys(store.all(), &["zeta", "alpha", "list"]);
    assert_eq!(store.value("alpha"), table! { "b" => 2, "a" => 1 });
    assert_eq!(store.value("list"), list![3, 2, 1]);
}

#[test]
fn test_decode_numeric_object_keys() {
    let store = json::decode_str(r#"{"1": "one", "007": "bond"}"#).unwrap();
    assert!(store.exists(1, true));
    assert!(store.exists("007", true));
    assert_eq!(store.value(1), "one");
}

#[test]
fn test_decode_scalar_document_is_wrapped() {
    let store = json::decode_str("42").unwrap();
    assert_eq!(store.all(), &list![42]);
    assert!(json::decode_str("null").unwrap().is_empty());
}

#[test]
fn test_encode_lists_and_maps() {
    let store = json::decode_str(r#"{"tags": ["a", "b"], "ids": {"1": "one", "3": "three"}}"#)
        .unwrap();
    assert_eq!(
        json::encode_string(&store).unwrap(),
        r#"{"tags":["a","b"],"ids":{"1":"one","3":"three"}}"#
    );
    assert!(json::encode_pretty(&store).unwrap().contains('\n'));
    assert_eq!(store.to_string(), json::encode_string(&store).unwrap());
}

#[test]
fn test_load_path_errors() {
    let dir = setup_tempdir();

    let missing = json::load_path(dir.path().join("nope.json")).unwrap_err();
    assert!(missing.is_not_found());
    assert!(missing.path().is_some_and(|path| path.ends_with("nope.json")));

    let broken = write_json_file(&dir, "broken.json", "{\n  \"a\": ]\n}");
    let err = json::load_path(&broken).unwrap_err();
    assert!(err.is_malformed());
    assert!(matches!(err, CodecError::MalformedJson { line: 2, .. }));
    assert_eq!(err.position().map(|(line, _)| line), Some(2));
}

#[test]
fn test_load_path_reads_file() {
    let dir = setup_tempdir();
    let path = write_json_file(
        &dir,
        "settings.json",
        r#"{"database": {"driver": "mysql"}}"#,
    );

    let store = json::load_path(&path).unwrap();
    assert_eq!(store.value("database.driver"), "mysql");
    assert_eq!(store.get("database.port", 3306), Value::from(3306));
}

#[test]
fn test_is_valid() {
    assert!(json::is_valid(r#"{"a": [1, 2]}"#));
    assert!(json::is_valid("\"text\""));
    assert!(!json::is_valid(""));
    assert!(!json::is_valid("{a: 1}"));
}
