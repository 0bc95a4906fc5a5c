//! Error handling for the sdkgen pipeline.
//!
//! Every failure in the pipeline is fatal to the current run: the render
//! plan, the swagger download, schema resolution, and template rendering
//! all abort on the first error. This module defines the single error type
//! used throughout the crate along with a convenient `Result` alias.

use thiserror::Error;

/// Result type for sdkgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sdkgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport error while downloading the swagger document
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Template engine error during rendering
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Render plan error (missing, unreadable, or malformed configuration)
    #[error("Render plan error: {0}")]
    Plan(String),

    /// A configured template failed to compile
    #[error("template '{file}' failed to compile: {source}")]
    TemplateCompile {
        file: String,
        #[source]
        source: tera::Error,
    },

    /// Swagger download failed (non-success status or unusable payload)
    #[error("Swagger download error: {0}")]
    Download(String),

    /// A parameter declared a location outside the recognized set
    /// (path, query, body, header, formData)
    #[error("unrecognized parameter location '{location}' on parameter '{name}'")]
    UnknownParameterLocation { location: String, name: String },

    /// A property or parameter declaration could not be mapped to a type name
    #[error("type '{0}' is not implemented")]
    UnimplementedType(String),

    /// An output-path or replacement pattern referenced an unknown token
    #[error("field '{0}' not found when merging filenames")]
    UnknownMergeField(String),
}

impl Error {
    /// Create a new render plan error
    pub fn plan<S: Into<String>>(msg: S) -> Self {
        Self::Plan(msg.into())
    }

    /// Create a new download error
    pub fn download<S: Into<String>>(msg: S) -> Self {
        Self::Download(msg.into())
    }
}
