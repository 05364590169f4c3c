//! Identifier and secret generation.

use uuid::Uuid;

/// A new random identifier for projects, sources and destinations.
///
/// Time-ordered (UUID v7) so ids sort by creation, rendered without dashes.
#[must_use]
pub fn random_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// A new random secret for API keys (UUID v4, hyphenated).
#[must_use]
pub fn random_secret() -> String {
    Uuid::new_v4().to_string()
}

/// A short random name, `len` hex characters long (at most 32).
#[must_use]
pub fn random_name(len: usize) -> String {
    let mut name = Uuid::new_v4().simple().to_string();
    name.truncate(len);
    name
}
