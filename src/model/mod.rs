//! The in-memory API model produced from a swagger document.
//!
//! Built once per run and handed by reference to every template
//! execution. Category- and model-filtered renders receive read-only
//! filtered copies, never a mutated original.

mod builder;

pub use builder::ModelBuilder;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::resolve::PAGINATION_WRAPPER_PREFIX;

/// Where a parameter travels in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    Header,
    FormData,
}

impl ParameterLocation {
    /// Map a swagger `in` value to a location. Returns `None` for anything
    /// outside the recognized set; the builder treats that as fatal.
    pub fn from_swagger(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "body" => Some(Self::Body),
            "header" => Some(Self::Header),
            "formData" => Some(Self::FormData),
            _ => None,
        }
    }
}

/// One resolved parameter or model property
#[derive(Debug, Clone, Serialize)]
pub struct ApiParameter {
    pub name: String,
    /// Identifier-safe name: the raw name with the `$` the exporter uses
    /// on paging options (`$include`, `$top`, ...) stripped
    pub clean_name: String,
    pub type_name: String,
    pub location: ParameterLocation,
    pub comment: String,
    pub required: bool,
    pub read_only: bool,
    pub max_length: Option<u32>,
    pub min_length: Option<u32>,
    pub is_array: bool,
    /// Present whenever `is_array` is true
    pub array_element_type: Option<String>,
}

/// One logical endpoint operation
#[derive(Debug, Clone, Serialize)]
pub struct ApiMethod {
    pub name: String,
    pub category: String,
    pub uri: String,
    pub http_verb: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// All parameters in declared order, except that a body parameter is
    /// always the last element
    pub parameters: Vec<ApiParameter>,
    pub body_param: Option<ApiParameter>,
    /// Raw swagger type of the success response schema, when present
    pub response_type: Option<String>,
    pub response_type_name: Option<String>,
}

/// One named data-model definition
#[derive(Debug, Clone, Serialize)]
pub struct ApiModelDefinition {
    pub schema_name: String,
    pub comment: String,
    pub example: Option<JsonValue>,
    pub properties: Vec<ApiParameter>,
}

/// One enum value with its optional comment
#[derive(Debug, Clone, Serialize)]
pub struct EnumItem {
    pub value: String,
    pub comment: Option<String>,
}

/// One enum definition, registered lazily by the first parameter or
/// property that references it
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnumDefinition {
    pub name: String,
    pub items: Vec<EnumItem>,
}

/// The complete API model: methods, data models, and enums
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiModel {
    pub api_version: Option<String>,
    pub methods: Vec<ApiMethod>,
    pub models: Vec<ApiModelDefinition>,
    pub enums: Vec<ApiEnumDefinition>,
    /// Distinct categories, sorted
    pub categories: Vec<String>,
}

impl ApiModel {
    /// Read-only view with the method list filtered to one category.
    pub fn category_view(&self, category: &str) -> ApiModel {
        ApiModel {
            methods: self
                .methods
                .iter()
                .filter(|m| m.category == category)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Read-only view excluding the pagination-wrapper schemas.
    pub fn unique_models_view(&self) -> ApiModel {
        ApiModel {
            models: self
                .models
                .iter()
                .filter(|m| !m.schema_name.starts_with(PAGINATION_WRAPPER_PREFIX))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Read-only view containing only the pagination-wrapper schemas.
    pub fn fetch_models_view(&self) -> ApiModel {
        ApiModel {
            models: self
                .models
                .iter()
                .filter(|m| m.schema_name.starts_with(PAGINATION_WRAPPER_PREFIX))
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}
