use serde::Serialize;

/// A kind of data source the console can sync from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceType {
    pub id: &'static str,
    pub name: &'static str,
    pub comment: &'static str,
}

static SOURCES: [SourceType; 3] = [
    SourceType {
        id: "firebase",
        name: "Firebase",
        comment: "Firebase - an app development platform own by Google. Jitsu syncs firestore objects, users and many more",
    },
    SourceType {
        id: "google_play",
        name: "Google Play",
        comment: "Google Play is an mobile app store. Jitsu syncs earnings (revenue) and payouts",
    },
    SourceType {
        id: "google_analytics",
        name: "Google Analytics",
        comment: "Google Analytics is a website & app analytics. Jitsu syncs all data based on configured dimensions & keys",
    },
];

impl SourceType {
    /// Every supported source, in display order.
    #[must_use]
    pub fn all() -> &'static [SourceType] {
        &SOURCES
    }

    /// Looks a source up by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static SourceType> {
        SOURCES.iter().find(|s| s.id == id)
    }
}
