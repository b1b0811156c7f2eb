//! Inheritance chains.
//!
//! The document requested by the caller is the chain's root. Each `inherit`
//! reference adds one more distant ancestor. Nodes live in a flat vector and
//! point at their parent by index, so walking the chain never recurses.
//!
//! Walks that apply ancestry (substitution, tag lookup) go from the furthest
//! ancestor down to the root, see [`InheritanceChain::ancestors_first`].

mod blob;
mod builder;


pub use blob::encode_chain;
pub use builder::{ChainBuilder, DEFAULT_MAX_INHERIT_DEPTH};

use crate::document::ConfigurationDocument;
use std::path::PathBuf;

/// Where a chain node's document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Read from this file.
    File(PathBuf),
    /// Decoded from a serialized chain blob.
    Embedded,
}

/// One document and a handle to its parent.
#[derive(Debug, Clone)]
pub struct ChainNode {
    pub document: ConfigurationDocument,
    pub source: DocumentSource,
    parent: Option<usize>,
}

/// A resolved, read-only inheritance chain.
#[derive(Debug, Clone)]
pub struct InheritanceChain {
    nodes: Vec<ChainNode>,
}

impl InheritanceChain {
    pub(crate) fn new(document: ConfigurationDocument, source: DocumentSource) -> Self {
        Self {
            nodes: vec![ChainNode {
                document,
                source,
                parent: None,
            }],
        }
    }

    /// Link `document` as the parent of the current furthest ancestor.
    pub(crate) fn push_parent(&mut self, document: ConfigurationDocument, source: DocumentSource) {
        let index = self.nodes.len();
        if let Some(last) = self.nodes.last_mut() {
            last.parent = Some(index);
        }
        self.nodes.push(ChainNode {
            document,
            source,
            parent: None,
        });
    }

    /// The requested document.
    pub fn root(&self) -> &ConfigurationDocument {
        &self.nodes[0].document
    }

    /// The furthest ancestor added so far.
    pub(crate) fn last_node(&self) -> &ChainNode {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of documents in the chain, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes from the root outwards, following parent links.
    pub fn iter(&self) -> impl Iterator<Item = &ChainNode> {
        std::iter::successors(Some(&self.nodes[0]), |node| {
            node.parent.and_then(|index| self.nodes.get(index))
        })
    }

    /// Nodes from the furthest ancestor down to the root.
    pub fn ancestors_first(&self) -> impl Iterator<Item = &ChainNode> {
        let mut order: Vec<&ChainNode> = self.iter().collect();
        order.reverse();
        order.into_iter()
    }

    /// Output directory registered for `tag_id`.
    ///
    /// The furthest ancestor that registers the tag wins over any closer
    /// document registering the same id.
    pub fn tag_search(&self, tag_id: &str) -> Option<&str> {
        self.ancestors_first()
            .find_map(|node| node.document.tag_path(tag_id))
    }
}
