//! Tera-based template rendering.
//!
//! Templates are compiled up front, before the swagger document is
//! fetched, so a malformed template fails the run without any network
//! access or partial output. Rendering itself walks the configured tasks
//! in order and writes files under the target root, overwriting
//! unconditionally; there is no merging with prior output.

pub mod fixup;
pub mod pattern;

use std::path::Path;

use tera::{Context, Tera};
use tracing::{debug, info};

use crate::config::{RenderTarget, RenderTemplateTask, TemplateKind};
use crate::error::{Error, Result};
use crate::model::ApiModel;
use crate::render::pattern::MergeValues;

/// One template task with its compiled Tera instance
struct CompiledTemplate {
    task: RenderTemplateTask,
    name: String,
    tera: Tera,
}

/// One render target with all of its templates compiled
pub struct CompiledTarget {
    target: RenderTarget,
    templates: Vec<CompiledTemplate>,
}

impl CompiledTarget {
    /// Read and compile every template of the target. Template files are
    /// resolved relative to the render plan's directory.
    pub async fn compile(target: &RenderTarget, base_dir: &Path) -> Result<Self> {
        let mut templates = Vec::new();
        for task in &target.templates {
            let path = base_dir.join(&task.file);
            debug!(template = %path.display(), "Compiling template");
            let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::plan(format!("Failed to read template {}: {e}", path.display()))
            })?;

            let name = task.file.to_string_lossy().to_string();
            let mut tera = Tera::default();
            tera.add_raw_template(&name, &contents)
                .map_err(|e| Error::TemplateCompile {
                    file: name.clone(),
                    source: e,
                })?;

            templates.push(CompiledTemplate {
                task: task.clone(),
                name,
                tera,
            });
        }

        Ok(Self {
            target: target.clone(),
            templates,
        })
    }

    pub fn name(&self) -> &str {
        &self.target.name
    }

    /// Render every template task of this target against the model.
    pub async fn render(&self, model: &ApiModel) -> Result<()> {
        for template in &self.templates {
            info!(
                target = %self.target.name,
                template = %template.name,
                "Rendering template"
            );
            match template.task.kind {
                TemplateKind::SingleFile => self.render_single_file(template, model).await?,
                TemplateKind::Methods => self.render_methods(template, model).await?,
                TemplateKind::MethodCategories => {
                    self.render_method_categories(template, model).await?
                }
                TemplateKind::Models => self.render_models(template, model, model).await?,
                TemplateKind::UniqueModels => {
                    // Pagination wrappers are excluded via a read-only view
                    let view = model.unique_models_view();
                    self.render_models(template, &view, &view).await?
                }
                TemplateKind::FetchModels => {
                    let view = model.fetch_models_view();
                    self.render_models(template, &view, &view).await?
                }
                TemplateKind::Enums => self.render_enums(template, model).await?,
            }
        }
        Ok(())
    }

    /// Apply this target's fixups after its templates have rendered.
    pub async fn apply_fixups(&self, model: &ApiModel) -> Result<()> {
        fixup::apply_fixups(&self.target, model).await
    }

    async fn render_single_file(&self, template: &CompiledTemplate, model: &ApiModel) -> Result<()> {
        let mut context = Context::new();
        context.insert("api", model);
        let rendered = template.tera.render(&template.name, &context)?;
        self.write_output(&template.task.output, &rendered).await
    }

    async fn render_method_categories(
        &self,
        template: &CompiledTemplate,
        model: &ApiModel,
    ) -> Result<()> {
        for category in &model.categories {
            let view = model.category_view(category);
            let mut context = Context::new();
            context.insert("api", &view);
            context.insert("category", category);
            let rendered = template.tera.render(&template.name, &context)?;

            let mut values = MergeValues::new();
            values.insert("category", category.clone());
            let output = pattern::merge(&template.task.output, &values)?;
            self.write_output(&output, &rendered).await?;
        }
        Ok(())
    }

    async fn render_methods(&self, template: &CompiledTemplate, model: &ApiModel) -> Result<()> {
        for method in &model.methods {
            let mut context = Context::new();
            context.insert("api", model);
            context.insert("method", method);
            context.insert("category", &method.category);
            let rendered = template.tera.render(&template.name, &context)?;

            let mut values = MergeValues::new();
            values.insert("method", method.name.clone());
            values.insert("category", method.category.clone());
            let output = pattern::merge(&template.task.output, &values)?;
            self.write_output(&output, &rendered).await?;
        }
        Ok(())
    }

    async fn render_models(
        &self,
        template: &CompiledTemplate,
        api: &ApiModel,
        working_set: &ApiModel,
    ) -> Result<()> {
        for definition in &working_set.models {
            let mut context = Context::new();
            context.insert("api", api);
            context.insert("model", definition);
            let rendered = template.tera.render(&template.name, &context)?;

            let mut values = MergeValues::new();
            values.insert("model", definition.schema_name.clone());
            let output = pattern::merge(&template.task.output, &values)?;
            self.write_output(&output, &rendered).await?;
        }
        Ok(())
    }

    async fn render_enums(&self, template: &CompiledTemplate, model: &ApiModel) -> Result<()> {
        for enum_type in &model.enums {
            let mut context = Context::new();
            context.insert("api", model);
            context.insert("enum_type", enum_type);
            let rendered = template.tera.render(&template.name, &context)?;

            let mut values = MergeValues::new();
            values.insert("enumDataType", enum_type.name.clone());
            let output = pattern::merge(&template.task.output, &values)?;
            self.write_output(&output, &rendered).await?;
        }
        Ok(())
    }

    /// Write one rendered file under the target root, creating parent
    /// directories as needed and overwriting unconditionally.
    async fn write_output(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.target.root_folder.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        debug!(path = %path.display(), "Writing output file");
        tokio::fs::write(&path, content).await?;
        Ok(())
    }
}
