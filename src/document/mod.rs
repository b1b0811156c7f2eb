//! Configuration documents.
//!
//! A document declares file templates, tag output directories and variable
//! groups, and may name a parent document through `inherit`. Documents can be
//! written in YAML, JSON or TOML; unknown fields are ignored.

mod format;
mod model;
mod operations;


pub use format::DocumentFormat;
pub use model::{ConfigurationDocument, FileTemplate, GroupItem, ItemValue, VariableGroup};
