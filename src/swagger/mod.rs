//! Passive data model for Swagger 2.0 documents.
//!
//! These types mirror the JSON shape of the swagger export and carry no
//! behavior beyond deserialization. `BTreeMap` is used for `paths`,
//! per-path verbs, and `definitions` so that iteration is always in
//! ascending key order, which the model builder relies on for
//! deterministic output.

mod loader;

pub use loader::{FileSwaggerLoader, HttpSwaggerLoader, SwaggerLoader, load_swagger};

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// A deserialized Swagger 2.0 document. Immutable once loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: Option<String>,
    #[serde(default)]
    pub info: SwaggerApiInfo,
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, SwaggerOperation>>,
    #[serde(default)]
    pub definitions: BTreeMap<String, SwaggerDefinition>,
    /// Version stamp the exporter writes as a vendor extension
    #[serde(rename = "x-avalara-version")]
    pub api_version: Option<String>,
}

impl SwaggerDocument {
    /// The API version string used by fixups, preferring the exporter's
    /// vendor extension over the standard info block.
    pub fn resolved_api_version(&self) -> Option<&str> {
        self.api_version
            .as_deref()
            .or(self.info.version.as_deref())
    }
}

/// The `info` block of a swagger document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerApiInfo {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// One operation: a (path, verb) pair with its parameters and responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerOperation {
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<SwaggerProperty>,
    #[serde(default)]
    pub responses: BTreeMap<String, SwaggerResponse>,
    #[serde(default)]
    pub deprecated: bool,
}

/// One response descriptor under an operation's `responses` map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerResponse {
    pub description: Option<String>,
    pub schema: Option<SwaggerProperty>,
}

/// A named schema under `definitions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerDefinition {
    pub description: Option<String>,
    /// Schema-level list of property names that are required
    pub required: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, SwaggerProperty>,
    pub example: Option<JsonValue>,
}

/// One property, parameter, item, or response-schema descriptor.
///
/// The swagger export uses the same recursive shape for all of these, so a
/// single struct covers them: parameters additionally carry `name` and
/// `in`, body parameters and responses nest a `schema`, arrays nest
/// `items`, and schema references carry `$ref`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerProperty {
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub prop_type: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "readOnly", default)]
    pub read_only: bool,
    #[serde(rename = "maxLength")]
    pub max_length: Option<u32>,
    #[serde(rename = "minLength")]
    pub min_length: Option<u32>,
    pub example: Option<JsonValue>,
    #[serde(rename = "$ref")]
    pub schema_ref: Option<String>,
    pub schema: Option<Box<SwaggerProperty>>,
    pub items: Option<Box<SwaggerProperty>>,
    /// Raw enum value list, when the exporter declares one
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Name of the enum type, written by the exporter as a vendor extension
    #[serde(rename = "x-enum-type")]
    pub enum_data_type: Option<String>,
}
