use std::{fs, path::Path};

use thumbgen_types::Result;
use tracing::info;

use crate::{inject_block, write_error, GcodeBlock};

/// Writes `block` as the complete contents of `path`, replacing any existing file.
pub fn write_block(path: &Path, block: &GcodeBlock) -> Result<()> {
    fs::write(path, block.to_text()).map_err(|err| {
        write_error(format!(
            "failed to write G-code to {}: {err}",
            path.display()
        ))
    })?;
    info!("G-code successfully written to {}", path.display());
    Ok(())
}

/// Embeds `block` at the top of the existing G-code file at `path`.
pub fn write_injected(path: &Path, block: &GcodeBlock) -> Result<()> {
    let existing = fs::read_to_string(path).map_err(|err| {
        write_error(format!("failed to read G-code from {}: {err}", path.display()))
    })?;
    let updated = inject_block(&existing, block)?;
    fs::write(path, updated).map_err(|err| {
        write_error(format!(
            "failed to write G-code to {}: {err}",
            path.display()
        ))
    })?;
    info!("Thumbnail injected into {}", path.display());
    Ok(())
}
