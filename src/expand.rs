//! Deciding which variants each file template produces.
//!
//! The output pattern's tag tokens select the variants:
//! - `name<tags>` expands over every tag the root document declares
//! - `name<a><b>` produces one variant per listed token, in order
//! - `name` produces a single untagged variant

use crate::chain::InheritanceChain;
use crate::document::FileTemplate;
use tracing::{debug, warn};

/// The variants planned for one file template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan<'a> {
    pub file: &'a FileTemplate,
    /// Output file name with tag tokens stripped.
    pub base_name: String,
    /// One entry per variant; an empty string is the untagged context.
    pub tags: Vec<String>,
}

/// Plan the variants of every file template of the root document, in
/// declaration order.
pub fn expand_variants(chain: &InheritanceChain) -> Vec<FilePlan<'_>> {
    let root = chain.root();

    root.files
        .iter()
        .map(|file| {
            let placeholder = file.output_placeholder();

            let tags = if placeholder.is_all_tags() {
                if root.tags.is_empty() {
                    warn!(file = %file.id, "output expands over all tags but none are declared");
                }
                root.tags.iter().map(|tag| tag.id.clone()).collect()
            } else if !placeholder.tags.is_empty() {
                placeholder.tags
            } else {
                vec![String::new()]
            };

            debug!(file = %file.id, base = %placeholder.base, variants = tags.len(), "planned variants");
            FilePlan {
                file,
                base_name: placeholder.base,
                tags,
            }
        })
        .collect()
}
