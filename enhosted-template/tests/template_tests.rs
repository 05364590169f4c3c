use enhosted_template::{
    FieldDescriptor, SchemaDescriptor, TemplateConfig, TemplateError, TemplateGenerator, TypeNode,
    WarningReason, generate_template,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn descriptor(json: serde_json::Value) -> SchemaDescriptor {
    SchemaDescriptor::from_json(&json).unwrap()
}

fn jitsu_descriptor() -> SchemaDescriptor {
    descriptor(json!({
        "nested": {
            "jitsu": {
                "nested": {
                    "FirebaseConfig": {
                        "fields": {
                            "projectId": {"type": "string", "id": 1},
                            "credentials": {"type": "Credentials", "id": 2},
                            "collections": {"type": "string", "rule": "repeated", "id": 3},
                            "options": {"type": "google.protobuf.Struct", "id": 4},
                            "syncUsers": {"type": "bool", "id": 5},
                            "mode": {"type": "SyncMode", "id": 6}
                        }
                    },
                    "Credentials": {
                        "fields": {
                            "keyJson": {"type": "string", "id": 1},
                            "expiresIn": {"type": "uint64", "id": 2},
                            "scopes": {"type": "Scope", "rule": "repeated", "id": 3}
                        },
                        "nested": {
                            "Scope": {
                                "fields": {
                                    "name": {"type": "string", "id": 1},
                                    "weight": {"type": "double", "id": 2}
                                }
                            }
                        }
                    },
                    "SyncMode": {
                        "values": {"INCREMENTAL": 1, "FULL": 0}
                    }
                }
            }
        }
    }))
}

// ── Scalars ──────────────────────────────────────────────────────

#[test]
fn leaf_message_template() {
    let d = descriptor(json!({
        "nested": {
            "Leaf": {
                "fields": {
                    "a": {"type": "string"},
                    "b": {"type": "int32"},
                    "c": {"type": "int32", "rule": "repeated"}
                }
            }
        }
    }));
    assert_eq!(
        generate_template(&d, "Leaf").unwrap(),
        json!({"a": "", "b": 0, "c": [0]})
    );
}

#[test]
fn every_scalar_tag_has_a_zero_value() {
    let ints = [
        "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32", "fixed64",
        "sfixed32", "sfixed64",
    ];
    let mut fields: Vec<(String, FieldDescriptor)> = ints
        .iter()
        .map(|t| (t.to_string(), FieldDescriptor::new(t)))
        .collect();
    for t in ["float", "double", "boolean", "bool", "string", "bytes"] {
        fields.push((t.to_string(), FieldDescriptor::new(t)));
    }
    let d = SchemaDescriptor::new(TypeNode::namespace([(
        "All".to_string(),
        TypeNode::message(fields),
    )]));

    let value = generate_template(&d, "All").unwrap();
    for t in ints {
        assert_eq!(value[t], json!(0), "{t}");
    }
    assert_eq!(value["float"], json!(0.0));
    assert_eq!(value["double"], json!(0.0));
    assert_eq!(value["boolean"], json!(true));
    assert_eq!(value["bool"], json!(true));
    assert_eq!(value["string"], json!(""));
    assert_eq!(value["bytes"], json!(""));
}

#[test]
fn message_without_fields_entries_is_empty_object() {
    let d = descriptor(json!({"nested": {"Empty": {"fields": {}}}}));
    assert_eq!(generate_template(&d, "Empty").unwrap(), json!({}));
}

// ── References ───────────────────────────────────────────────────

#[test]
fn nested_references_expand() {
    let value = generate_template(&jitsu_descriptor(), "jitsu.FirebaseConfig").unwrap();
    assert_eq!(
        value,
        json!({
            "projectId": "",
            "credentials": {
                "keyJson": "",
                "expiresIn": 0,
                "scopes": [{"name": "", "weight": 0.0}]
            },
            "collections": [""],
            "options": {},
            "syncUsers": true,
            "mode": "FULL"
        })
    );
}

#[test]
fn inner_type_can_be_the_root() {
    let value = generate_template(&jitsu_descriptor(), "jitsu.Credentials.Scope").unwrap();
    assert_eq!(value, json!({"name": "", "weight": 0.0}));
}

#[test]
fn absolute_reference_resolves_from_root() {
    let d = descriptor(json!({
        "nested": {
            "a": {"nested": {"Outer": {"fields": {"inner": {"type": ".b.Inner"}}}}},
            "b": {"nested": {"Inner": {"fields": {"n": {"type": "int64"}}}}}
        }
    }));
    assert_eq!(
        generate_template(&d, "a.Outer").unwrap(),
        json!({"inner": {"n": 0}})
    );
}

#[test]
fn dotted_reference_resolves_from_root_when_not_in_scope() {
    let d = descriptor(json!({
        "nested": {
            "a": {"nested": {"Outer": {"fields": {"inner": {"type": "b.Inner"}}}}},
            "b": {"nested": {"Inner": {"fields": {"n": {"type": "string"}}}}}
        }
    }));
    assert_eq!(
        generate_template(&d, "a.Outer").unwrap(),
        json!({"inner": {"n": ""}})
    );
}

// ── Degraded fields ──────────────────────────────────────────────

#[test]
fn unknown_field_type_degrades_with_warning() {
    let d = descriptor(json!({
        "nested": {
            "Leaf": {
                "fields": {
                    "ok": {"type": "string"},
                    "broken": {"type": "Missing"}
                }
            }
        }
    }));
    let report = TemplateGenerator::new(&d)
        .generate_with_report("Leaf")
        .unwrap();

    assert_eq!(report.value, json!({"ok": "", "broken": {}}));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].field, "broken");
    assert_eq!(report.warnings[0].type_name, "Missing");
    assert_eq!(report.warnings[0].reason, WarningReason::UnresolvedType);
}

#[test]
fn repeated_unknown_type_is_array_of_empty_object() {
    let d = descriptor(json!({
        "nested": {"Leaf": {"fields": {"xs": {"type": "Nope", "rule": "repeated"}}}}
    }));
    assert_eq!(generate_template(&d, "Leaf").unwrap(), json!({"xs": [{}]}));
}

#[test]
fn warning_path_names_nested_field() {
    let d = descriptor(json!({
        "nested": {
            "Outer": {"fields": {"inner": {"type": "Inner"}}},
            "Inner": {"fields": {"lost": {"type": "Gone"}}}
        }
    }));
    let report = TemplateGenerator::new(&d)
        .generate_with_report("Outer")
        .unwrap();
    assert_eq!(report.warnings[0].field, "inner.lost");
    assert_eq!(
        report.warnings[0].to_string(),
        "unknown type Gone at field inner.lost"
    );
}

#[test]
fn namespace_reference_degrades() {
    let d = descriptor(json!({
        "nested": {
            "Leaf": {"fields": {"x": {"type": "pkg"}}},
            "pkg": {"nested": {"Inner": {"fields": {}}}}
        }
    }));
    let report = TemplateGenerator::new(&d)
        .generate_with_report("Leaf")
        .unwrap();
    assert_eq!(report.value, json!({"x": {}}));
    assert_eq!(report.warnings[0].reason, WarningReason::UnresolvedType);
}

#[test]
fn self_reference_is_cut() {
    let d = descriptor(json!({
        "nested": {
            "Node": {
                "fields": {
                    "label": {"type": "string"},
                    "children": {"type": "Node", "rule": "repeated"}
                }
            }
        }
    }));
    let report = TemplateGenerator::new(&d)
        .generate_with_report("Node")
        .unwrap();
    assert_eq!(report.value, json!({"label": "", "children": [{}]}));
    assert_eq!(report.warnings[0].reason, WarningReason::RecursiveType);
}

#[test]
fn depth_limit_is_respected() {
    let d = descriptor(json!({
        "nested": {
            "A": {"fields": {"b": {"type": "B"}}},
            "B": {"fields": {"c": {"type": "C"}}},
            "C": {"fields": {"v": {"type": "string"}}}
        }
    }));
    let config = TemplateConfig {
        max_depth: 2,
        ..TemplateConfig::default()
    };
    let report = TemplateGenerator::new(&d)
        .with_config(config)
        .generate_with_report("A")
        .unwrap();
    assert_eq!(report.value, json!({"b": {"c": {}}}));
    assert_eq!(report.warnings[0].reason, WarningReason::DepthLimit);
}

#[test]
fn configured_struct_types_render_empty() {
    let d = descriptor(json!({
        "nested": {"Leaf": {"fields": {"meta": {"type": "acme.Bag"}}}}
    }));
    let config = TemplateConfig {
        well_known_struct_types: vec!["acme.Bag".to_string()],
        ..TemplateConfig::default()
    };
    let report = TemplateGenerator::new(&d)
        .with_config(config)
        .generate_with_report("Leaf")
        .unwrap();
    assert_eq!(report.value, json!({"meta": {}}));
    assert!(report.warnings.is_empty());
}

// ── Root resolution errors ───────────────────────────────────────

#[test]
fn unknown_root_type_fails() {
    let err = generate_template(&jitsu_descriptor(), "jitsu.Nope").unwrap_err();
    match err {
        TemplateError::UnresolvedRootType {
            segment,
            path,
            known,
        } => {
            assert_eq!(segment, "Nope");
            assert_eq!(path, "jitsu.Nope");
            assert_eq!(known, vec!["Credentials", "FirebaseConfig", "SyncMode"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_first_segment_fails() {
    let err = generate_template(&jitsu_descriptor(), "other.FirebaseConfig").unwrap_err();
    assert_eq!(
        err.to_string(),
        "can't find other (in other.FirebaseConfig) among [jitsu]"
    );
}

#[test]
fn empty_type_name_fails() {
    let err = generate_template(&jitsu_descriptor(), "").unwrap_err();
    assert!(matches!(err, TemplateError::EmptyTypeName));
}

#[test]
fn namespace_root_fails() {
    let err = generate_template(&jitsu_descriptor(), "jitsu").unwrap_err();
    assert!(matches!(err, TemplateError::NotAMessage { .. }));
}

#[test]
fn enum_root_fails() {
    let err = generate_template(&jitsu_descriptor(), "jitsu.SyncMode").unwrap_err();
    assert!(matches!(err, TemplateError::NotAMessage { .. }));
}
