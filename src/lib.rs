//! sdkgen core library
//!
//! Transforms a Swagger 2.0 document into client SDK source files via
//! configurable text templates: fetch the document, build an API model
//! (methods, data models, enums), render each configured target, apply
//! post-render fixups.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod resolve;
pub mod swagger;

pub use crate::{
    config::RenderPlan,
    error::{Error, Result},
    model::{ApiModel, ModelBuilder},
    swagger::SwaggerDocument,
};
