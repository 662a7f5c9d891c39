//! Key expression resolution tests

use dotstore::{Container, Key, KeyExpr, Path, list, path::resolve, table};

#[test]
fn test_resolve_shapes() {
    assert!(resolve(KeyExpr::Root).is_root());
    assert!(resolve(None::<&str>).is_root());
    assert_eq!(
        resolve("a.b.c").segments(),
        &[Key::from("a"), Key::from("b"), Key::from("c")]
    );
    assert_eq!(
        resolve(["a.b", "c"]).segments(),
        &[Key::from("a.b"), Key::from("c")]
    );
    assert_eq!(resolve(7).segments(), &[Key::Int(7)]);
    assert_eq!(resolve(2.5).segments(), &[Key::from("2.5")]);
}

#[test]
fn test_empty_segments_are_kept() {
    let path = resolve("a..b");
    assert_eq!(path.len(), 3);
    assert_eq!(path.segments()[1], Key::from(""));

    let store = Container::from_table(table! {
        "a" => table! { "" => table! { "b" => "hidden" } }
    });
    assert_eq!(store.value("a..b"), "hidden");
}

#[test]
fn test_numeric_segments_index_lists() {
    let store = Container::from_table(table! { "users" => list!["ana", "ben"] });
    assert_eq!(resolve("users.1").segments()[1], Key::Int(1));
    assert_eq!(store.value("users.1"), "ben");
    assert_eq!(store.value(Path::new().push("users").push(0)), "ana");
}

#[test]
fn test_path_parts() {
    let path = resolve("app.db.host");

    assert_eq!(path.to_string(), "app.db.host");
    assert_eq!(
        path.parent().map(|p| p.to_string()),
        Some("app.db".to_string())
    );
    assert_eq!(path.first(), Some(&Key::from("app")));
    assert_eq!(path.last(), Some(&Key::from("host")));
    assert_eq!(Path::new().to_string(), "(root)");
}
