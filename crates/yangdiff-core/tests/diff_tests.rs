#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixture, sorted_deletes, sorted_updates};
use yangdiff_core::schema::{FieldSchema, RecordSchema};
use yangdiff_core::tree::{LeafValue, Record};
use yangdiff_core::wire::ScalarArray;
use yangdiff_core::{diff, DiffOptions, TypedValue, YangDiffError};

#[test]
fn test_added_string_leaf_is_single_update() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("str", LeafValue::string("cabernet-sauvignon"))
        .unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();

    assert_eq!(n.update_paths(), vec!["/str"]);
    assert_eq!(
        n.value_at("/str"),
        Some(&TypedValue::StringVal("cabernet-sauvignon".to_string()))
    );
    assert!(n.delete.is_empty());
    assert!(!n.atomic);
    assert_eq!(n.prefix, None);
}

#[test]
fn test_multi_alias_leaf_reports_every_alias() {
    let fx = fixture();
    let modified = fx.empty().with("x", LeafValue::Int(5)).unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();
    assert_eq!(sorted_updates(&n), vec!["/config/x", "/x"]);

    let n = diff(
        &fx.empty(),
        &modified,
        &DiffOptions::new().map_to_single_path(),
    )
    .unwrap();
    assert_eq!(n.update_paths(), vec!["/x"]);
}

#[test]
fn test_shadow_aliases_replace_primary_when_preferred() {
    let fx = fixture();
    let modified = fx.empty().with("mtu", LeafValue::Uint(1500)).unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();
    assert_eq!(n.update_paths(), vec!["/config/mtu"]);

    let n = diff(
        &fx.empty(),
        &modified,
        &DiffOptions::new().prefer_shadow_path(),
    )
    .unwrap();
    assert_eq!(n.update_paths(), vec!["/state/mtu"]);
    assert_eq!(n.value_at("/state/mtu"), Some(&TypedValue::UintVal(1500)));
}

#[test]
fn test_removed_leaf_deletes_every_alias() {
    let fx = fixture();
    let original = fx.empty().with("x", LeafValue::Int(1)).unwrap();

    let n = diff(&original, &fx.empty(), &DiffOptions::default()).unwrap();

    assert!(n.update.is_empty());
    assert_eq!(sorted_deletes(&n), vec!["/config/x", "/x"]);
}

#[test]
fn test_ignore_additions_keeps_changes_and_deletes() {
    let fx = fixture();
    let original = fx
        .empty()
        .with("str", LeafValue::string("a"))
        .unwrap()
        .with("mtu", LeafValue::Uint(9000))
        .unwrap();
    let modified = fx
        .empty()
        .with("str", LeafValue::string("b"))
        .unwrap()
        .with("x", LeafValue::Int(1))
        .unwrap();

    let n = diff(&original, &modified, &DiffOptions::new().ignore_additions()).unwrap();

    assert_eq!(n.update_paths(), vec!["/str"]);
    assert_eq!(n.delete_paths(), vec!["/config/mtu"]);
}

#[test]
fn test_keyed_list_paths_carry_entry_keys() {
    let fx = fixture();
    let original = fx
        .empty()
        .with("interfaces", fx.interfaces(vec![fx.interface("eth0", Some("up"))]))
        .unwrap();
    let modified = fx
        .empty()
        .with(
            "interfaces",
            fx.interfaces(vec![
                fx.interface("eth0", Some("down")),
                fx.interface("eth1", None),
            ]),
        )
        .unwrap();

    let n = diff(&original, &modified, &DiffOptions::default()).unwrap();

    assert_eq!(
        sorted_updates(&n),
        vec![
            "/interfaces/interface[name=eth0]/config/description",
            "/interfaces/interface[name=eth1]/config/name",
            "/interfaces/interface[name=eth1]/name",
        ]
    );
    assert_eq!(
        n.value_at("/interfaces/interface[name=eth0]/config/description"),
        Some(&TypedValue::StringVal("down".to_string()))
    );
    assert!(n.delete.is_empty());
}

#[test]
fn test_removed_list_entry_deletes_its_leaves() {
    let fx = fixture();
    let original = fx
        .empty()
        .with(
            "interfaces",
            fx.interfaces(vec![fx.interface("eth0", None), fx.interface("eth1", None)]),
        )
        .unwrap();
    let modified = fx
        .empty()
        .with("interfaces", fx.interfaces(vec![fx.interface("eth0", None)]))
        .unwrap();

    let n = diff(&original, &modified, &DiffOptions::default()).unwrap();

    assert_eq!(
        sorted_deletes(&n),
        vec![
            "/interfaces/interface[name=eth1]/config/name",
            "/interfaces/interface[name=eth1]/name",
        ]
    );
}

#[test]
fn test_key_values_with_reserved_characters_are_escaped() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("interfaces", fx.interfaces(vec![fx.interface("eth0/1", None)]))
        .unwrap();

    let n = diff(
        &fx.empty(),
        &modified,
        &DiffOptions::new().map_to_single_path(),
    )
    .unwrap();

    assert_eq!(n.update_paths(), vec!["/interfaces/interface[name=eth0\\/1]/name"]);
    let parsed: yangdiff_core::Path = n.update_paths()[0].parse().unwrap();
    assert_eq!(parsed, n.update[0].path);
}

#[test]
fn test_enum_leaf_encodes_name_and_unset_is_absent() {
    let fx = fixture();

    let up = fx.empty().with("status", fx.status(1)).unwrap();
    let n = diff(&fx.empty(), &up, &DiffOptions::default()).unwrap();
    assert_eq!(
        n.value_at("/status"),
        Some(&TypedValue::StringVal("UP".to_string()))
    );

    let unset = fx.empty().with("status", fx.status(0)).unwrap();
    let n = diff(&fx.empty(), &unset, &DiffOptions::default()).unwrap();
    assert!(n.is_empty());

    let n = diff(&up, &unset, &DiffOptions::default()).unwrap();
    assert_eq!(n.delete_paths(), vec!["/status"]);
}

#[test]
fn test_enum_without_name_fails_with_path() {
    let fx = fixture();
    let bad = fx.empty().with("status", fx.status(7)).unwrap();

    let err = diff(&fx.empty(), &bad, &DiffOptions::default()).unwrap_err();
    match err {
        YangDiffError::ValueEncoding { path, value, .. } => {
            assert_eq!(path, "/status");
            assert_eq!(value, "Status(7)");
        }
        other => panic!("expected ValueEncoding, got {:?}", other),
    }
}

#[test]
fn test_union_and_leaf_list_values() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("value", LeafValue::union(LeafValue::Int(3)))
        .unwrap()
        .with(
            "tags",
            LeafValue::LeafList(vec![LeafValue::string("a"), LeafValue::string("b")]),
        )
        .unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();

    assert_eq!(n.value_at("/value"), Some(&TypedValue::IntVal(3)));
    assert_eq!(
        n.value_at("/tags"),
        Some(&TypedValue::LeaflistVal(ScalarArray {
            element: vec![
                TypedValue::StringVal("a".to_string()),
                TypedValue::StringVal("b".to_string()),
            ]
        }))
    );
}

#[test]
fn test_empty_leaf_list_is_absent() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("tags", LeafValue::LeafList(vec![]))
        .unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();
    assert!(n.is_empty());
}

#[test]
fn test_annotation_fields_never_diff() {
    let fx = fixture();
    let a = fx
        .empty()
        .with("metadata", LeafValue::string("rev-1"))
        .unwrap();
    let b = fx
        .empty()
        .with("metadata", LeafValue::string("rev-2"))
        .unwrap();

    assert!(diff(&a, &b, &DiffOptions::default()).unwrap().is_empty());
}

#[test]
fn test_type_mismatch_returns_no_notification() {
    let fx = fixture();
    let interface = fx.interface("eth0", None);

    let err = diff(&fx.empty(), &interface, &DiffOptions::default()).unwrap_err();
    assert_eq!(
        err,
        YangDiffError::TypeMismatch {
            original: "Device".to_string(),
            modified: "Interface".to_string(),
        }
    );
}

#[test]
fn test_field_without_alias_aborts_diff() {
    let schema = RecordSchema::new("Broken")
        .field(FieldSchema::leaf("ok", &["ok"]))
        .field(FieldSchema::leaf("orphan", &[]))
        .build();
    let modified = Record::new(&schema)
        .with("ok", LeafValue::Bool(true))
        .unwrap();

    let err = diff(&Record::new(&schema), &modified, &DiffOptions::default()).unwrap_err();
    assert_eq!(
        err,
        YangDiffError::MissingSchemaPath {
            record: "Broken".to_string(),
            field: "orphan".to_string(),
        }
    );
}

#[test]
fn test_ordered_list_is_flattened_without_atomic_mode() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("ordered", fx.ordered(&[("foo", "1")]))
        .unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();

    assert!(!n.atomic);
    assert_eq!(
        sorted_updates(&n),
        vec![
            "/ordered-lists/ordered-list[key=foo]/config/key",
            "/ordered-lists/ordered-list[key=foo]/config/value",
            "/ordered-lists/ordered-list[key=foo]/key",
        ]
    );
}

#[test]
fn test_nested_ordered_lists_are_flattened_without_atomic_mode() {
    let fx = fixture();
    let modified = fx
        .empty()
        .with("nested", fx.nested(vec![fx.outer("a", &["i1"])]))
        .unwrap();

    let n = diff(&fx.empty(), &modified, &DiffOptions::default()).unwrap();

    assert_eq!(
        sorted_updates(&n),
        vec![
            "/nested-lists/outer[key=a]/inner-lists/inner[key=i1]/config/value",
            "/nested-lists/outer[key=a]/inner-lists/inner[key=i1]/key",
            "/nested-lists/outer[key=a]/key",
        ]
    );
}

#[test]
fn test_options_from_config_text_drive_the_diff() {
    let fx = fixture();
    let modified = fx.empty().with("x", LeafValue::Int(5)).unwrap();

    let toml_opts = DiffOptions::from_toml_str("map_to_single_path = true\nfuture_knob = 3\n").unwrap();
    let json_opts = DiffOptions::from_json_str(r#"{"map_to_single_path": true}"#).unwrap();
    assert_eq!(toml_opts, json_opts);

    let n = diff(&fx.empty(), &modified, &toml_opts).unwrap();
    assert_eq!(n.update_paths(), vec!["/x"]);
}

#[test]
fn test_identical_rich_snapshots_diff_empty() {
    let fx = fixture();
    let tree = fx
        .empty()
        .with("str", LeafValue::string("s"))
        .unwrap()
        .with("x", LeafValue::Int(1))
        .unwrap()
        .with("status", fx.status(2))
        .unwrap()
        .with("interfaces", fx.interfaces(vec![fx.interface("eth0", Some("d"))]))
        .unwrap()
        .with("ordered", fx.ordered(&[("b", "2"), ("a", "1")]))
        .unwrap()
        .with("nested", fx.nested(vec![fx.outer("o", &["i"])]))
        .unwrap();

    let n = diff(&tree, &tree.clone(), &DiffOptions::default()).unwrap();
    assert!(n.is_empty());
}
