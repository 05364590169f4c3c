//! Stored documents: one per user and collection, each wrapping a list of
//! keyed entities plus a `_lastUpdated` stamp.

use chrono::{SecondsFormat, Utc};
use enhosted_collections::{IndexedList, Keyed};
use enhosted_marshal::PlainData;
use serde_json::Value;
use tracing::debug;

use crate::ModelResult;

/// Key of the save timestamp in every stored document.
pub const LAST_UPDATED: &str = "_lastUpdated";

/// Stamps `_lastUpdated` with the current UTC time, in RFC 3339 with
/// milliseconds. Non-object values are left alone.
pub fn touch_last_updated(document: &mut Value) {
    if let Value::Object(map) = document {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        map.insert(LAST_UPDATED.to_string(), Value::String(now));
    }
}

/// A document whose payload is a list of keyed entities.
pub trait StoredDocument: PlainData {
    type Item: Keyed + Clone;

    /// The entities in stored order.
    fn items(&self) -> &[Self::Item];

    /// A fresh document holding `items`, without a save stamp.
    fn with_items(items: Vec<Self::Item>) -> Self;

    /// Loads the entities into a list keyed by [`Keyed::key`].
    ///
    /// Fails if two stored entities share a key.
    fn to_list(&self) -> ModelResult<IndexedList<Self::Item>> {
        let mut list = IndexedList::keyed();
        list.push(self.items().iter().cloned())?;
        Ok(list)
    }

    /// Builds a document from an edited list.
    fn from_list(list: &IndexedList<Self::Item>) -> Self {
        Self::with_items(list.to_array().to_vec())
    }

    /// Loads a document from its stored JSON.
    fn load(json: &Value) -> ModelResult<Self> {
        let document = Self::from_plain_data(json)?;
        debug!(items = document.items().len(), "loaded stored document");
        Ok(document)
    }

    /// Produces the JSON to store, stamped with the save time.
    fn to_stored(&self) -> ModelResult<Value> {
        let mut json = self.to_plain_data()?;
        touch_last_updated(&mut json);
        Ok(json)
    }
}
