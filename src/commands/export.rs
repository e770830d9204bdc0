use std::path::PathBuf;

use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use rsvp_core::export::{self, ExportFormat, suggested_file_name};

use super::Context;

pub fn run(ctx: &Context, id: &str, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let event = ctx.event(id)?;

    let content = export::export(&event, format, ctx.config.base_url())?;
    let path = output.unwrap_or_else(|| PathBuf::from(suggested_file_name(&event, format)));

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{}",
        format!("  Exported {} to {}", format, path.display()).green()
    );
    Ok(())
}
