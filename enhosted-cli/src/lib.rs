//! Commands behind the `enhosted` binary.
//!
//! Each command reads its inputs from disk and returns the text to print, so
//! the binary only parses arguments and sets up logging.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use enhosted_collections::IndexedList;
use enhosted_model::{
    ApiKeys, Destination, DestinationType, Destinations, EventNativeConfig, S3Config, SourceType,
    StoredDocument,
};
use enhosted_template::{SchemaDescriptor, TemplateConfig, TemplateGenerator};
use serde_json::Value;
use tracing::{info, warn};

/// Builds the template of `type_name` from the descriptor at `descriptor_path`.
///
/// Unknown field types are logged and left as `{}` in the result.
pub fn template(descriptor_path: &Path, type_name: &str, config: Option<&Path>) -> Result<Value> {
    let text = fs::read_to_string(descriptor_path)
        .with_context(|| format!("Failed to read descriptor {}", descriptor_path.display()))?;
    let descriptor =
        SchemaDescriptor::from_json_str(&text).context("Failed to parse descriptor")?;

    let config = config.map(TemplateConfig::load_from).unwrap_or_default();
    let report = TemplateGenerator::new(&descriptor)
        .with_config(config)
        .generate_with_report(type_name)
        .with_context(|| format!("Failed to build template for {type_name}"))?;

    if !report.warnings.is_empty() {
        warn!(
            "{} field(s) of {} were left as {{}}",
            report.warnings.len(),
            type_name
        );
    }
    Ok(report.value)
}

/// Loads a stored destinations document into a list keyed by destination id.
pub fn load_destinations(path: &Path) -> Result<IndexedList<Destination>> {
    let document = Destinations::load(&read_json(path)?).context("Failed to restore destinations")?;
    let list = document
        .to_list()
        .context("Destinations document has conflicting ids")?;
    info!("Loaded {} destinations", list.len());
    Ok(list)
}

/// Builds the EventNative configuration for stored API keys and destinations.
///
/// `hosted_s3` is a TOML file describing the bucket Redshift destinations
/// use when they opt into hosted staging.
pub fn eventnative_config(
    api_keys_path: &Path,
    destinations_path: &Path,
    hosted_s3: Option<&Path>,
    server_name: Option<&str>,
) -> Result<EventNativeConfig> {
    let keys = ApiKeys::load(&read_json(api_keys_path)?).context("Failed to restore API keys")?;
    let destinations = Destinations::load(&read_json(destinations_path)?)
        .context("Failed to restore destinations")?;
    let hosted_s3 = hosted_s3.map(load_s3_config).transpose()?;

    let config = EventNativeConfig::build(server_name, &keys, &destinations, hosted_s3.as_ref())
        .context("Failed to build EventNative configuration")?;
    info!(
        "Built configuration with {} keys and {} destinations",
        config.server.auth.len(),
        config.destinations.len()
    );
    Ok(config)
}

fn load_s3_config(path: &Path) -> Result<S3Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read S3 config {}", path.display()))?;
    toml::from_str(&text).context("Failed to parse S3 config")
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not JSON", path.display()))
}

/// One `id  type  name` row per destination, in stored order.
pub fn destination_rows(list: &IndexedList<Destination>) -> Vec<String> {
    list.iter()
        .map(|d| {
            let name = d.kind().map(|k| k.display_name()).unwrap_or("unknown");
            format!("{}  {}  {}", d.id, d.destination_type, name)
        })
        .collect()
}

pub fn destination_type_rows() -> Vec<String> {
    DestinationType::ALL
        .iter()
        .map(|k| format!("{}  {}", k.type_id(), k.display_name()))
        .collect()
}

pub fn source_type_rows() -> Vec<String> {
    SourceType::all()
        .iter()
        .map(|s| format!("{}  {}  {}", s.id, s.name, s.comment))
        .collect()
}
