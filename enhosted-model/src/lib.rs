//! Console entity model for enhosted.
//!
//! Defines the entities the console stores per project:
//! - [`ApiKey`] / [`ApiKeys`]: client and server secrets for event ingestion
//! - [`Destination`] / [`Destinations`]: databases events are written to
//! - [`CustomDomain`] / [`CustomDomains`]: tracking domains
//! - [`User`] / [`Project`]: the signed-in account
//! - [`SourceType`]: the catalog of sync sources
//! - [`EventNativeConfig`]: the event server configuration built from a
//!   project's keys and destinations
//!
//! Every entity converts to and from its stored JSON through
//! [`enhosted_marshal::PlainData`]. Documents holding lists of entities
//! implement [`StoredDocument`], which loads them into an
//! [`enhosted_collections::IndexedList`] for editing.

mod api_key;
mod custom_domain;
mod destination;
mod document;
mod error;
mod eventnative;
mod ids;
mod source;
mod user;

pub use api_key::{ApiKey, ApiKeys};
pub use custom_domain::{CustomDomain, CustomDomains};
pub use destination::{
    ClickHouseFormData, Destination, DestinationForm, DestinationType, Destinations, MapRule,
    Mappings, PostgresFormData, RedshiftFormData, TableSettings,
};
pub use document::{LAST_UPDATED, StoredDocument, touch_last_updated};
pub use error::{ModelError, ModelResult};
pub use eventnative::{
    BATCH_MODE, ClickHouseConfig, DataLayout, DataSourceConfig, DestinationConfig,
    EventNativeConfig, MappingType, REDSHIFT_PORT, S3Config, ServerConfig,
};
pub use ids::{random_id, random_name, random_secret};
pub use source::SourceType;
pub use user::{Project, SuggestedUserInfo, User};
