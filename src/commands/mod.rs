//! Command implementations for conjure.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the chain loading every command shares.

mod encode;
mod render;

use crate::chain::{ChainBuilder, InheritanceChain};
use crate::cli::{Command, SourceArgs};
use crate::error::{ConjureError, Result};
use crate::settings::EngineSettings;
use tracing::info;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Render(args) => render::cmd_render(args),
        Command::Encode(args) => encode::cmd_encode(args),
    }
}

/// Build settings for `args` and load the chain rooted at its source document.
fn load_chain(args: &SourceArgs) -> Result<(EngineSettings, InheritanceChain)> {
    let source = args.source.trim();
    if source.is_empty() {
        return Err(ConjureError::UserError(
            "--source must name a conjure document".to_string(),
        ));
    }

    let mut settings = EngineSettings::for_source(source, args.format.as_deref())?;
    settings.max_inherit_depth = args.max_depth;
    settings.validate()?;

    let chain = ChainBuilder::new(settings.format)
        .with_max_depth(settings.max_inherit_depth)
        .load(source)?;
    info!(
        source,
        format = %settings.format,
        documents = chain.len(),
        "loaded inheritance chain"
    );

    Ok((settings, chain))
}
