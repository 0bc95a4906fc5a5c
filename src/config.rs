//! Render-plan configuration.
//!
//! The plan is a JSON document naming the swagger source and an ordered
//! list of render targets. It is deserialized once, before any network
//! access, and never mutated.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// The whole render plan: one swagger source, many targets
#[derive(Debug, Clone, Deserialize)]
pub struct RenderPlan {
    /// URL (or local path) of the swagger document to process
    #[serde(rename = "swaggerUri")]
    pub swagger_uri: String,
    /// Targets are rendered in declared order
    pub targets: Vec<RenderTarget>,
}

impl RenderPlan {
    /// Load a plan from disk. A missing, unreadable, or malformed file is
    /// a configuration error; nothing else has happened yet.
    pub fn from_file(path: &Path) -> Result<RenderPlan> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::plan(format!("Failed to read render plan {}: {e}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::plan(format!(
                "Failed to parse render plan {}: {e}",
                path.display()
            ))
        })
    }
}

/// One output language/SDK to generate
#[derive(Debug, Clone, Deserialize)]
pub struct RenderTarget {
    pub name: String,
    /// Root folder for all files and fixups under this target
    #[serde(rename = "rootFolder")]
    pub root_folder: PathBuf,
    #[serde(default)]
    pub templates: Vec<RenderTemplateTask>,
    #[serde(default)]
    pub fixups: Vec<RenderFixupTask>,
}

/// Granularity of one template execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TemplateKind {
    /// One file for the whole API
    #[serde(rename = "singleFile")]
    SingleFile,
    /// One file per method
    #[serde(rename = "methods")]
    Methods,
    /// One file per method category
    #[serde(rename = "methodCategories")]
    MethodCategories,
    /// One file per model
    #[serde(rename = "models")]
    Models,
    /// One file per model, excluding pagination wrappers
    #[serde(rename = "uniqueModels")]
    UniqueModels,
    /// One file per pagination-wrapper model
    #[serde(rename = "fetchModels")]
    FetchModels,
    /// One file per enum
    #[serde(rename = "enums")]
    Enums,
}

/// One template execution: a template file, its kind, and the output
/// path pattern (`{category}`, `{method}`, `{model}`, `{enumDataType}`
/// tokens, optionally with `.lower`/`.trim`)
#[derive(Debug, Clone, Deserialize)]
pub struct RenderTemplateTask {
    /// Template path, relative to the render plan's directory
    pub file: PathBuf,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub output: String,
}

/// Output encoding for a fixup rewrite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FixupEncoding {
    #[default]
    #[serde(rename = "UTF8")]
    Utf8,
    #[serde(rename = "ASCII")]
    Ascii,
}

/// One regex find-and-replace applied to one already-rendered file
#[derive(Debug, Clone, Deserialize)]
pub struct RenderFixupTask {
    /// File path, relative to the target's root folder
    pub file: PathBuf,
    #[serde(default)]
    pub encoding: FixupEncoding,
    pub regex: String,
    pub replacement: String,
}
