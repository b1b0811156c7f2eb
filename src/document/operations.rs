//! Document loading and validation.

use super::format::DocumentFormat;
use super::model::{ConfigurationDocument, GroupItem, RawDocument, VariableGroup};
use crate::error::{ConjureError, Result};
use std::collections::HashSet;
use std::path::Path;

impl ConfigurationDocument {
    /// Load a document from a file.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigurationDocument)` - Parsed and validated document
    /// * `Err(ConjureError::Load)` - Unreadable file or malformed content
    /// * `Err(ConjureError::Validation)` - Required fields missing
    pub fn load<P: AsRef<Path>>(path: P, format: DocumentFormat) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConjureError::Load(format!("failed to read '{}': {}", path.display(), e))
        })?;

        Self::parse(&content, format).map_err(|err| match err {
            ConjureError::Load(msg) => ConjureError::Load(format!("{}: {}", path.display(), msg)),
            ConjureError::Validation(msg) => {
                ConjureError::Validation(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a document from text in the given format.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let raw: RawDocument = if text.trim().is_empty() {
            RawDocument::default()
        } else {
            format.parse(text).map_err(|e| {
                ConjureError::Load(format!("failed to parse {} document: {}", format, e))
            })?
        };

        let document = Self::from_raw(raw)?;
        document.validate()?;
        Ok(document)
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let files = raw
            .files
            .ok_or_else(|| ConjureError::Validation("missing required field `files`".to_string()))?;
        let raw_groups = raw
            .groups
            .ok_or_else(|| ConjureError::Validation("missing required field `groups`".to_string()))?;

        let mut groups = Vec::with_capacity(raw_groups.len());
        for group in raw_groups {
            let mut items = Vec::with_capacity(group.items.len());
            for item in group.items {
                let value = item.value.ok_or_else(|| {
                    ConjureError::Validation(format!(
                        "item `{}` in group `{}` has no value",
                        item.id, group.id
                    ))
                })?;
                items.push(GroupItem { id: item.id, value });
            }
            groups.push(VariableGroup {
                id: group.id,
                items,
            });
        }

        Ok(Self {
            inherit: raw.inherit.filter(|s| !s.trim().is_empty()),
            files,
            tags: raw.tags.unwrap_or_default(),
            groups,
        })
    }

    /// Validate structural rules.
    ///
    /// Validation rules:
    /// - every file has a non-empty `path`
    /// - tag ids and paths are non-empty, tag ids are unique
    /// - group ids are non-empty
    /// - item ids are non-empty and unique within their group
    pub fn validate(&self) -> Result<()> {
        for (index, file) in self.files.iter().enumerate() {
            if file.path.trim().is_empty() {
                return Err(ConjureError::Validation(format!(
                    "file `{}` (entry {}) has an empty `path`",
                    file.id, index
                )));
            }
        }

        let mut tag_ids = HashSet::new();
        for tag in &self.tags {
            if tag.id.is_empty() || tag.path.is_empty() {
                return Err(ConjureError::Validation(format!(
                    "tag entries require both `id` and `path` (found id '{}', path '{}')",
                    tag.id, tag.path
                )));
            }
            if !tag_ids.insert(tag.id.as_str()) {
                return Err(ConjureError::Validation(format!(
                    "tag `{}` is declared more than once",
                    tag.id
                )));
            }
        }

        for group in &self.groups {
            if group.id.is_empty() {
                return Err(ConjureError::Validation(
                    "group entries require an `id`".to_string(),
                ));
            }

            let mut item_ids = HashSet::new();
            for item in &group.items {
                if item.id.is_empty() {
                    return Err(ConjureError::Validation(format!(
                        "group `{}` has an item without an `id`",
                        group.id
                    )));
                }
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ConjureError::Validation(format!(
                        "item `{}` is declared more than once in group `{}`",
                        item.id, group.id
                    )));
                }
            }
        }

        Ok(())
    }
}
