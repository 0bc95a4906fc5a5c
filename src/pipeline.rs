//! Top-level render-task driver.
//!
//! The whole run is one sequential pipeline: parse the render plan,
//! compile every template, fetch the swagger document, build the API
//! model once, then render each target in declared order and apply its
//! fixups. Every error is fatal; file writes are not rolled back on a
//! mid-run failure.

use std::path::Path;

use tracing::info;

use crate::config::RenderPlan;
use crate::error::Result;
use crate::model::{ApiModel, ModelBuilder};
use crate::render::CompiledTarget;
use crate::swagger::load_swagger;

/// Execute one full generation run from a render plan file.
pub async fn run(plan_path: &Path) -> Result<()> {
    info!(path = %plan_path.display(), "Parsing render plan");
    let plan = RenderPlan::from_file(plan_path)?;

    // Template paths are relative to the plan's directory. Compiling them
    // all now means a malformed plan or template fails before any network
    // access.
    let base_dir = plan_path.parent().unwrap_or_else(|| Path::new("."));
    let mut targets = Vec::new();
    for target in &plan.targets {
        targets.push(CompiledTarget::compile(target, base_dir).await?);
    }

    info!(uri = %plan.swagger_uri, "Downloading swagger document");
    let document = load_swagger(&plan.swagger_uri).await?;

    info!("Processing swagger document");
    let model = ModelBuilder::build(&document)?;
    info!(
        methods = model.methods.len(),
        models = model.models.len(),
        enums = model.enums.len(),
        categories = model.categories.len(),
        "Built API model"
    );

    render(&targets, &model).await?;

    info!("Done");
    Ok(())
}

/// Render every compiled target, in declared order, fixups last per
/// target.
async fn render(targets: &[CompiledTarget], model: &ApiModel) -> Result<()> {
    for target in targets {
        info!(target = %target.name(), "Rendering target");
        target.render(model).await?;
        target.apply_fixups(model).await?;
    }
    Ok(())
}
