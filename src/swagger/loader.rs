//! Swagger document loaders.
//!
//! The primary mode is a plain HTTP GET against the configured URL; a
//! local file path is also accepted. There is no retry: a transport
//! failure or non-success status aborts the run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::swagger::SwaggerDocument;

/// Loads a swagger document from some source string
#[async_trait]
pub trait SwaggerLoader {
    async fn load(&self, source: &str) -> Result<SwaggerDocument>;
}

/// Loads swagger documents from HTTP/HTTPS URLs
pub struct HttpSwaggerLoader {
    client: Client,
}

impl HttpSwaggerLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpSwaggerLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SwaggerLoader for HttpSwaggerLoader {
    async fn load(&self, source: &str) -> Result<SwaggerDocument> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(Error::download(format!(
                "HttpSwaggerLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            Error::download(format!("Failed to fetch swagger document from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::download(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| Error::download(format!("Failed to read response body: {e}")))?;

        parse_document(&content)
    }
}

/// Loads swagger documents from local file paths
pub struct FileSwaggerLoader;

#[async_trait]
impl SwaggerLoader for FileSwaggerLoader {
    async fn load(&self, source: &str) -> Result<SwaggerDocument> {
        let content = tokio::fs::read_to_string(source).await.map_err(|e| {
            Error::download(format!("Failed to read swagger document {source}: {e}"))
        })?;
        parse_document(&content)
    }
}

/// Load a swagger document from a URL or a local file path.
pub async fn load_swagger(source: &str) -> Result<SwaggerDocument> {
    if source.starts_with("http://") || source.starts_with("https://") {
        HttpSwaggerLoader::new().load(source).await
    } else {
        FileSwaggerLoader.load(source).await
    }
}

/// Parse the document payload, trying JSON first and then YAML.
fn parse_document(content: &str) -> Result<SwaggerDocument> {
    match serde_json::from_str(content) {
        Ok(doc) => Ok(doc),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            Error::download(format!(
                "Payload is neither valid JSON ({json_err}) nor valid YAML ({yaml_err})"
            ))
        }),
    }
}
