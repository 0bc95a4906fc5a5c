//! Regex find-and-replace fixups applied to already-rendered files.
//!
//! Each fixup targets exactly one file under the target root, one
//! encoding, one regex, and one replacement string. Fixups run exactly
//! once per generation cycle: re-applying one to an already-patched file
//! whose regex no longer matches is a silent no-op.

use regex::Regex;
use tracing::{info, warn};

use crate::config::{FixupEncoding, RenderFixupTask, RenderTarget};
use crate::error::{Error, Result};
use crate::model::ApiModel;
use crate::render::pattern::{self, MergeValues};

/// Apply every fixup of the target, in declared order.
pub async fn apply_fixups(target: &RenderTarget, model: &ApiModel) -> Result<()> {
    for fixup in &target.fixups {
        apply_one(target, fixup, model).await?;
    }
    Ok(())
}

async fn apply_one(
    target: &RenderTarget,
    fixup: &RenderFixupTask,
    model: &ApiModel,
) -> Result<()> {
    let path = target.root_folder.join(&fixup.file);
    if !path.exists() {
        warn!(path = %path.display(), "Fixup target file not found, skipping");
        return Ok(());
    }

    let regex = Regex::new(&fixup.regex)
        .map_err(|e| Error::plan(format!("Invalid fixup regex '{}': {e}", fixup.regex)))?;
    let replacement = pattern::merge(&fixup.replacement, &merge_values(model))?;

    info!(path = %path.display(), "Applying fixup");
    let contents = tokio::fs::read_to_string(&path).await?;
    let replaced = regex.replace_all(&contents, replacement.as_str());

    let output = match fixup.encoding {
        FixupEncoding::Utf8 => replaced.into_owned(),
        // ASCII output substitutes '?' for anything outside the range,
        // matching the narrowing the original encoding performed
        FixupEncoding::Ascii => replaced
            .chars()
            .map(|c| if c.is_ascii() { c } else { '?' })
            .collect(),
    };
    tokio::fs::write(&path, output).await?;
    Ok(())
}

/// Tokens available to fixup replacement strings.
fn merge_values(model: &ApiModel) -> MergeValues<'static> {
    let version = model.api_version.clone().unwrap_or_default();
    let mut values = MergeValues::new();
    // Some contexts (nuspec, composer) disallow dashes in version strings
    values.insert("api_version_dotted", version.replace('-', "."));
    values.insert("api_version", version);
    values
}
