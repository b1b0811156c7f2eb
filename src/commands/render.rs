//! Implementation of the `conjure render` command.
//!
//! Loads the chain, recalls every variant, then either lists the output
//! paths (`--dry-run`) or writes them.

use super::load_chain;
use crate::cli::RenderArgs;
use crate::engine::Engine;
use crate::error::Result;
use tracing::info;

/// Execute the `conjure render` command.
pub fn cmd_render(args: RenderArgs) -> Result<()> {
    let (mut settings, chain) = load_chain(&args.source)?;
    if let Some(root) = args.template_root {
        settings.template_root = root;
    }
    if let Some(root) = args.output_root {
        settings.output_root = root;
    }
    settings.dry_run = args.dry_run;

    let engine = Engine::new(&chain, &settings);
    let variants = engine.recall()?;

    if settings.dry_run {
        let paths = engine.output_paths(&variants)?;
        for (variant, path) in variants.iter().zip(&paths) {
            println!("{} [{}] -> {}", variant.file_id, variant.tag, path.display());
        }
        return Ok(());
    }

    let written = engine.write_files(&variants)?;
    info!(
        files = written.len(),
        output_root = %settings.output_root.display(),
        "render complete"
    );
    Ok(())
}
