use enhosted_marshal::{MarshalError, PlainData};
use enhosted_model::{ModelError, Project, SuggestedUserInfo, User};
use pretty_assertions::assert_eq;
use serde_json::json;

fn suggested() -> SuggestedUserInfo {
    SuggestedUserInfo::new("  Alice@Example.com ", Some("Alice A"))
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn suggested_email_is_normalized() {
    assert_eq!(suggested().email, "alice@example.com");
}

#[test]
fn new_user_takes_suggestions() {
    let user = User::new("uid-1", suggested());
    assert_eq!(user.uid, "uid-1");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name.as_deref(), Some("Alice A"));
    assert!(!user.onboarded);
    assert!(user.projects.is_empty());
}

#[test]
fn register_creates_one_unnamed_project() {
    let user = User::register("uid-2", "bob@example.com", Some("Bob"));
    assert_eq!(user.projects.len(), 1);
    assert_eq!(user.projects[0].name, None);
    assert!(!user.projects[0].id.is_empty());
    assert_eq!(user.name.as_deref(), Some("Bob"));
}

#[test]
fn complete_onboarding_sets_project_and_name() {
    let mut user = User::new("uid-1", suggested());
    user.complete_onboarding("Alice", "Acme");
    assert!(user.onboarded);
    assert_eq!(user.name.as_deref(), Some("Alice"));
    assert_eq!(user.projects[0].name.as_deref(), Some("Acme"));
}

// ── Stored document ──────────────────────────────────────────────

#[test]
fn to_stored_replaces_project_list() {
    let mut user = User::new("uid-1", suggested());
    user.projects = vec![Project {
        id: "p1".into(),
        name: Some("Acme".into()),
    }];
    user.onboarded = true;

    let stored = user.to_stored().unwrap();
    assert_eq!(stored["_project"], json!({"_id": "p1", "_name": "Acme"}));
    assert!(stored.get("_projects").is_none());
    assert_eq!(stored["_uid"], "uid-1");
    assert_eq!(stored["_onboarded"], true);
}

#[test]
fn to_stored_requires_exactly_one_project() {
    let user = User::new("uid-1", suggested());
    assert!(matches!(
        user.to_stored().unwrap_err(),
        ModelError::ProjectCount(0)
    ));

    let mut two = user.clone();
    two.projects = vec![Project::new(None), Project::new(None)];
    assert!(matches!(
        two.to_stored().unwrap_err(),
        ModelError::ProjectCount(2)
    ));
}

#[test]
fn from_stored_restores_project_and_onboards() {
    let stored = json!({
        "_name": "Alice Stored",
        "_project": {"_id": "p9", "_name": "Stored Co"}
    });
    let user = User::from_stored("uid-1", suggested(), &stored).unwrap();

    assert!(user.onboarded);
    assert_eq!(user.uid, "uid-1");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name.as_deref(), Some("Alice Stored"));
    assert_eq!(
        user.projects,
        vec![Project {
            id: "p9".into(),
            name: Some("Stored Co".into())
        }]
    );
}

#[test]
fn from_stored_keeps_sign_in_identity() {
    let stored = json!({"_uid": "other", "_email": "other@example.com"});
    let user = User::from_stored("uid-1", suggested(), &stored).unwrap();
    assert_eq!(user.uid, "uid-1");
    assert_eq!(user.email, "alice@example.com");
}

#[test]
fn stored_round_trip() {
    let mut user = User::new("uid-1", suggested());
    user.complete_onboarding("Alice", "Acme");

    let stored = user.to_stored().unwrap();
    let restored = User::from_stored("uid-1", suggested(), &stored).unwrap();
    assert_eq!(restored, user);
}

#[test]
fn plain_data_accepts_both_shapes() {
    let with_list = json!({"_uid": "u", "_projects": [{"_id": "a"}, {"_id": "b"}]});
    let user = User::from_plain_data(&with_list).unwrap();
    assert_eq!(user.projects.len(), 2);

    let with_single = json!({"_uid": "u", "_project": {"_id": "a"}});
    let user = User::from_plain_data(&with_single).unwrap();
    assert_eq!(user.projects.len(), 1);
    assert_eq!(user.projects[0].id, "a");
}

#[test]
fn plain_data_ignores_legacy_type_tags() {
    let doc = json!({
        "$type": "User",
        "_uid": "u",
        "_project": {"$type": "Project", "_id": "a", "_name": null}
    });
    let user = User::from_plain_data(&doc).unwrap();
    assert_eq!(user.projects[0], Project { id: "a".into(), name: None });
}

#[test]
fn from_stored_skips_null_project() {
    let stored = json!({"_name": "A", "_project": null});
    let user = User::from_stored("uid-1", suggested(), &stored).unwrap();
    assert!(user.onboarded);
    assert_eq!(user.name.as_deref(), Some("A"));
    assert!(user.projects.is_empty());
}

#[test]
fn malformed_project_is_invalid() {
    let stored = json!({"_project": "p1"});
    let err = User::from_stored("uid-1", suggested(), &stored).unwrap_err();
    assert!(matches!(
        err,
        ModelError::Marshal(MarshalError::Invalid(ref message)) if message.contains("_project")
    ));
}
