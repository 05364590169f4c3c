//! Console users and their projects.
//!
//! In memory a user holds a list of projects. The stored document holds a
//! single `_project` instead, and a user can only be saved with exactly one.

use enhosted_marshal::{MarshalError, MarshalResult, PlainData, merge_into, to_pure_json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::random_id;
use crate::{ModelError, ModelResult};

const PROJECT_KEY: &str = "_project";
const PROJECTS_KEY: &str = "_projects";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: Option<String>,
}

impl Project {
    /// A new project with a random id.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            id: random_id(),
            name: name.map(str::to_string),
        }
    }
}

impl PlainData for Project {}

/// What the auth provider told us about a user at sign-in. Used to prefill
/// onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedUserInfo {
    /// Lower-cased email.
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SuggestedUserInfo {
    pub fn new(email: &str, name: Option<&str>) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            name: name.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(rename = "_email", default)]
    pub email: String,
    #[serde(rename = "_name", default)]
    pub name: Option<String>,
    #[serde(rename = "_projects", default)]
    pub projects: Vec<Project>,
    #[serde(rename = "_onboarded", default)]
    pub onboarded: bool,
    #[serde(rename = "_suggestedInfo", default)]
    pub suggested_info: SuggestedUserInfo,
}

impl User {
    /// A signed-in user with no stored document yet.
    pub fn new(uid: &str, suggested: SuggestedUserInfo) -> Self {
        Self {
            uid: uid.to_string(),
            email: suggested.email.clone(),
            name: suggested.name.clone(),
            projects: Vec::new(),
            onboarded: false,
            suggested_info: suggested,
        }
    }

    /// A freshly registered user owning one unnamed project.
    pub fn register(uid: &str, email: &str, name: Option<&str>) -> Self {
        let mut user = Self::new(uid, SuggestedUserInfo::new(email, None));
        user.name = name.map(str::to_string);
        user.projects = vec![Project::new(None)];
        user
    }

    /// A signed-in user whose stored document was found.
    ///
    /// Identity (`uid`, `email`, suggestions) comes from the sign-in; every
    /// other field comes from `stored`. The user counts as onboarded.
    pub fn from_stored(uid: &str, suggested: SuggestedUserInfo, stored: &Value) -> ModelResult<Self> {
        let mut base = Self::new(uid, suggested);
        base.name = None;

        let mut user = restore(&base, stored)?;
        user.uid = base.uid;
        user.email = base.email;
        user.suggested_info = base.suggested_info;
        user.onboarded = true;
        Ok(user)
    }

    /// Completes onboarding with a display name and a first project.
    pub fn complete_onboarding(&mut self, display_name: &str, project_name: &str) {
        self.onboarded = true;
        self.projects = vec![Project::new(Some(project_name))];
        self.name = Some(display_name.to_string());
    }

    /// The document to store: `_projects` replaced by a single `_project`.
    pub fn to_stored(&self) -> ModelResult<Value> {
        let [project] = self.projects.as_slice() else {
            return Err(ModelError::ProjectCount(self.projects.len()));
        };

        let mut json = to_pure_json(self)?;
        if let Value::Object(map) = &mut json {
            map.remove(PROJECTS_KEY);
            map.insert(PROJECT_KEY.to_string(), project.to_plain_data()?);
        }
        Ok(json)
    }
}

impl PlainData for User {
    /// Accepts both the stored shape (`_project`) and the in-memory shape
    /// (`_projects`).
    fn from_plain_data(json: &Value) -> MarshalResult<Self> {
        restore(&Self::default(), json)
    }
}

fn restore(base: &User, json: &Value) -> MarshalResult<User> {
    let mut rest = json.clone();
    let project = rest.as_object_mut().and_then(|map| map.remove(PROJECT_KEY));

    let mut user = merge_into(base, &rest)?;
    match project {
        None | Some(Value::Null) => {}
        Some(project @ Value::Object(_)) => {
            user.projects = vec![Project::from_plain_data(&project)?];
        }
        Some(other) => {
            return Err(MarshalError::Invalid(format!(
                "{PROJECT_KEY} must be an object or null, got {other}"
            )));
        }
    }
    Ok(user)
}
