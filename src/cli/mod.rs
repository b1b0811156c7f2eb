//! CLI argument parsing for conjure.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::chain::DEFAULT_MAX_INHERIT_DEPTH;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Conjure: render families of configuration files from inheriting documents.
///
/// A conjure document declares file templates, tag output directories and
/// `${group.item}` variable groups, and may inherit another document.
#[derive(Parser, Debug)]
#[command(name = "conjure")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for conjure.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every file variant and write the outputs.
    ///
    /// All variants are resolved before the first file is written; the first
    /// failure stops the run.
    Render(RenderArgs),

    /// Print the resolved chain as a blob usable as another document's `inherit`.
    Encode(EncodeArgs),
}

/// Options shared by every command that loads a chain.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// The conjure document to load.
    #[arg(short, long)]
    pub source: String,

    /// Document format (yaml, json, toml). Inferred from the extension when omitted.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Maximum number of documents in the inheritance chain.
    #[arg(long, default_value_t = DEFAULT_MAX_INHERIT_DEPTH)]
    pub max_depth: usize,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory relative template paths are read from.
    #[arg(long)]
    pub template_root: Option<PathBuf>,

    /// Directory relative output paths are written under.
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Resolve everything and list the outputs without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `encode` command.
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render_minimal() {
        let cli = Cli::try_parse_from(["conjure", "render", "-s", "conjure.yml"]).unwrap();
        assert_eq!(cli.verbose, 0);
        if let Command::Render(args) = cli.command {
            assert_eq!(args.source.source, "conjure.yml");
            assert!(args.source.format.is_none());
            assert_eq!(args.source.max_depth, DEFAULT_MAX_INHERIT_DEPTH);
            assert!(args.template_root.is_none());
            assert!(args.output_root.is_none());
            assert!(!args.dry_run);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_full() {
        let cli = Cli::try_parse_from([
            "conjure",
            "-vv",
            "render",
            "--source",
            "conf/app.toml",
            "--format",
            "toml",
            "--max-depth",
            "8",
            "--template-root",
            "templates",
            "--output-root",
            "build",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        if let Command::Render(args) = cli.command {
            assert_eq!(args.source.source, "conf/app.toml");
            assert_eq!(args.source.format.as_deref(), Some("toml"));
            assert_eq!(args.source.max_depth, 8);
            assert_eq!(args.template_root, Some(PathBuf::from("templates")));
            assert_eq!(args.output_root, Some(PathBuf::from("build")));
            assert!(args.dry_run);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_encode() {
        let cli = Cli::try_parse_from(["conjure", "encode", "-s", "base.yml", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        if let Command::Encode(args) = cli.command {
            assert_eq!(args.source.source, "base.yml");
        } else {
            panic!("Expected Encode command");
        }
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["conjure", "render"]).is_err());
    }
}
