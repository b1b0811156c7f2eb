//! Loading a document and every ancestor it inherits from.

use super::blob::decode_blob;
use super::{DocumentSource, InheritanceChain};
use crate::document::{ConfigurationDocument, DocumentFormat};
use crate::error::{ConjureError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default ceiling on the number of documents in a chain, root included.
pub const DEFAULT_MAX_INHERIT_DEPTH: usize = 64;

/// Builds inheritance chains with a fixed document format and depth ceiling.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    format: DocumentFormat,
    max_depth: usize,
}

impl ChainBuilder {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            max_depth: DEFAULT_MAX_INHERIT_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Load the document at `path` and link its ancestors.
    ///
    /// # Returns
    ///
    /// * `Ok(InheritanceChain)` - The root document and every ancestor
    /// * `Err(ConjureError::Load)` - A document is unreadable or malformed
    /// * `Err(ConjureError::Validation)` - A document lacks required fields
    /// * `Err(ConjureError::InheritanceResolution)` - A parent is missing,
    ///   the chain is cyclic, or it exceeds the depth ceiling
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<InheritanceChain> {
        let path = path.as_ref();
        let document = ConfigurationDocument::load(path, self.format)?;
        debug!(path = %path.display(), "loaded root document");

        let mut visited = HashSet::new();
        visited.insert(canonical(path));

        let chain = InheritanceChain::new(document, DocumentSource::File(path.to_path_buf()));
        self.link_ancestors(chain, visited)
    }

    fn link_ancestors(
        &self,
        mut chain: InheritanceChain,
        mut visited: HashSet<PathBuf>,
    ) -> Result<InheritanceChain> {
        loop {
            let current = chain.last_node();
            let Some(reference) = current.document.inherit.clone() else {
                break;
            };
            let child = describe(&current.source);

            if let Some(documents) = decode_blob(&reference)? {
                debug!(
                    child = %child,
                    documents = documents.len(),
                    "linked embedded ancestry"
                );
                for document in documents {
                    self.check_depth(&chain)?;
                    chain.push_parent(document, DocumentSource::Embedded);
                }
                break;
            }

            let parent_path = resolve_reference(&current.source, &reference);
            if !parent_path.is_file() {
                return Err(ConjureError::InheritanceResolution(format!(
                    "parent '{}' of {} not found at '{}'",
                    reference,
                    child,
                    parent_path.display()
                )));
            }

            if !visited.insert(canonical(&parent_path)) {
                return Err(ConjureError::InheritanceResolution(format!(
                    "inheritance cycle: {} inherits '{}' which is already in the chain",
                    child,
                    parent_path.display()
                )));
            }

            self.check_depth(&chain)?;
            let document = ConfigurationDocument::load(&parent_path, self.format)?;
            debug!(child = %child, parent = %parent_path.display(), "linked parent document");
            chain.push_parent(document, DocumentSource::File(parent_path));
        }

        Ok(chain)
    }

    fn check_depth(&self, chain: &InheritanceChain) -> Result<()> {
        if chain.len() >= self.max_depth {
            return Err(ConjureError::InheritanceResolution(format!(
                "inheritance chain exceeds the maximum depth of {} documents",
                self.max_depth
            )));
        }
        Ok(())
    }
}

/// Resolve an `inherit` path relative to the document that names it.
///
/// A bare name (no separator) is looked up next to the child document; any
/// reference containing a separator is used as-is.
fn resolve_reference(source: &DocumentSource, reference: &str) -> PathBuf {
    if reference.contains('/') || reference.contains(std::path::MAIN_SEPARATOR) {
        return PathBuf::from(reference);
    }

    let base_dir = match source {
        DocumentSource::File(path) => path.parent().map(Path::to_path_buf),
        DocumentSource::Embedded => None,
    };

    match base_dir {
        Some(dir) => dir.join(reference),
        None => PathBuf::from(reference),
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn describe(source: &DocumentSource) -> String {
    match source {
        DocumentSource::File(path) => format!("'{}'", path.display()),
        DocumentSource::Embedded => "an embedded document".to_string(),
    }
}
