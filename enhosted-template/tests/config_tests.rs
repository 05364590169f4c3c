use enhosted_template::{FieldKind, SchemaDescriptor, TemplateConfig, TemplateError};
use std::io::Write;

// ── TemplateConfig ───────────────────────────────────────────────

#[test]
fn defaults() {
    let config = TemplateConfig::default();
    assert_eq!(
        config.well_known_struct_types,
        vec!["google.protobuf.Struct"]
    );
    assert_eq!(config.max_depth, 32);
}

#[test]
fn empty_toml_gives_defaults() {
    let config = TemplateConfig::from_toml_str("").unwrap();
    assert_eq!(config, TemplateConfig::default());
}

#[test]
fn toml_overrides_keys() {
    let config = TemplateConfig::from_toml_str(
        r#"
        well_known_struct_types = ["google.protobuf.Struct", "google.protobuf.Any"]
        max_depth = 4
        "#,
    )
    .unwrap();
    assert_eq!(config.well_known_struct_types.len(), 2);
    assert_eq!(config.max_depth, 4);
}

#[test]
fn malformed_toml_is_config_error() {
    let err = TemplateConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
    assert!(matches!(err, TemplateError::Config(_)));
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = TemplateConfig::load_from(&dir.path().join("absent.toml"));
    assert_eq!(config, TemplateConfig::default());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_depth = 7").unwrap();
    let config = TemplateConfig::load_from(file.path());
    assert_eq!(config.max_depth, 7);
}

#[test]
fn load_from_broken_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_depth = [").unwrap();
    let config = TemplateConfig::load_from(file.path());
    assert_eq!(config, TemplateConfig::default());
}

#[test]
fn struct_type_match_ignores_leading_dot() {
    let config = TemplateConfig::default();
    assert!(config.is_struct_type("google.protobuf.Struct"));
    assert!(config.is_struct_type(".google.protobuf.Struct"));
    assert!(!config.is_struct_type("google.protobuf.Any"));
}

// ── FieldKind ────────────────────────────────────────────────────

#[test]
fn classify_scalars_and_references() {
    let config = TemplateConfig::default();
    assert_eq!(FieldKind::classify("string", &config), FieldKind::String);
    assert_eq!(FieldKind::classify("sfixed64", &config), FieldKind::Integer);
    assert_eq!(FieldKind::classify("double", &config), FieldKind::Float);
    assert_eq!(FieldKind::classify("boolean", &config), FieldKind::Bool);
    assert_eq!(
        FieldKind::classify("google.protobuf.Struct", &config),
        FieldKind::Struct
    );
    assert_eq!(
        FieldKind::classify("jitsu.Credentials", &config),
        FieldKind::Reference("jitsu.Credentials".to_string())
    );
}

#[test]
fn references_have_no_zero_value() {
    assert_eq!(FieldKind::Reference("X".into()).zero_value(), None);
    assert_eq!(FieldKind::Struct.zero_value(), Some(serde_json::json!({})));
}

// ── SchemaDescriptor parsing ─────────────────────────────────────

#[test]
fn descriptor_ignores_unknown_keys() {
    let d = SchemaDescriptor::from_json_str(
        r#"{"options": {"java_package": "x"}, "nested": {"M": {"fields": {"a": {"type": "string", "id": 1, "options": {}}}}}}"#,
    )
    .unwrap();
    let field = &d.root().nested["M"].fields.as_ref().unwrap()["a"];
    assert_eq!(field.type_name, "string");
    assert_eq!(field.id, Some(1));
    assert!(!field.is_repeated());
}

#[test]
fn descriptor_rejects_unknown_rule() {
    let err = SchemaDescriptor::from_json_str(
        r#"{"nested": {"M": {"fields": {"a": {"type": "string", "rule": "sometimes"}}}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, TemplateError::Descriptor(_)));
}

#[test]
fn resolve_reference_prefers_inner_scope() {
    let d = SchemaDescriptor::from_json_str(
        r#"{"nested": {
            "X": {"fields": {}},
            "pkg": {"nested": {"X": {"fields": {"inner": {"type": "string"}}}}}
        }}"#,
    )
    .unwrap();
    let scope = vec!["pkg".to_string(), "Outer".to_string()];
    let (path, _) = d.resolve_reference(&scope, "X").unwrap();
    assert_eq!(path, vec!["pkg", "X"]);

    let (path, _) = d.resolve_reference(&scope, ".X").unwrap();
    assert_eq!(path, vec!["X"]);
}
