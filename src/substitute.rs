//! `${group.item}` substitution over an inheritance chain.
//!
//! Documents are applied from the furthest ancestor down to the root, so a
//! closer document can rewrite placeholders that an ancestor's values
//! introduced. A group applies when its id carries the active tag, or carries
//! no tag at all. An ancestor's item is skipped when a closer document
//! defines an applicable item with the same `group.item` key, which lets
//! closer documents override inherited values. Placeholders nobody defines
//! are left in place.

use crate::chain::InheritanceChain;
use crate::document::{DocumentFormat, GroupItem, ItemValue, VariableGroup};
use crate::error::{ConjureError, Result};
use regex::bytes::{NoExpand, Regex};
use std::collections::HashSet;
use tracing::trace;

/// An applicable group with its tag tokens stripped from the id.
struct ScopedGroup<'a> {
    name: String,
    group: &'a VariableGroup,
}

/// Apply every matching group of `chain` to `bytes` under `tag`.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The substituted bytes
/// * `Err(ConjureError::Substitution)` - A referenced item's value cannot be rendered
pub fn substitute(
    chain: &InheritanceChain,
    mut bytes: Vec<u8>,
    tag: &str,
    format: DocumentFormat,
) -> Result<Vec<u8>> {
    let levels: Vec<Vec<ScopedGroup<'_>>> = chain
        .ancestors_first()
        .map(|node| applicable_groups(&node.document.groups, tag))
        .collect();

    // Keys defined at each level or closer to the root.
    let mut closer: Vec<HashSet<(&str, &str)>> = vec![HashSet::new(); levels.len()];
    let mut seen = HashSet::new();
    for (index, level) in levels.iter().enumerate().rev() {
        closer[index] = seen.clone();
        for scoped in level {
            for item in &scoped.group.items {
                seen.insert((scoped.name.as_str(), item.id.as_str()));
            }
        }
    }

    for (level, shadowed) in levels.iter().zip(&closer) {
        for scoped in level {
            for item in &scoped.group.items {
                if shadowed.contains(&(scoped.name.as_str(), item.id.as_str())) {
                    trace!(group = %scoped.name, item = %item.id, "overridden by a closer document");
                    continue;
                }
                bytes = apply_item(bytes, &scoped.name, scoped.group, item, format)?;
            }
        }
    }
    Ok(bytes)
}

fn applicable_groups<'a>(groups: &'a [VariableGroup], tag: &str) -> Vec<ScopedGroup<'a>> {
    groups
        .iter()
        .filter_map(|group| {
            let placeholder = group.id_placeholder();
            group_applies(&placeholder.tags, tag).then(|| ScopedGroup {
                name: placeholder.base,
                group,
            })
        })
        .collect()
}

/// Untagged groups apply under every context, including the untagged one.
fn group_applies(group_tags: &[String], tag: &str) -> bool {
    group_tags.is_empty() || group_tags.iter().any(|t| t == tag)
}

fn apply_item(
    bytes: Vec<u8>,
    group_name: &str,
    group: &VariableGroup,
    item: &GroupItem,
    format: DocumentFormat,
) -> Result<Vec<u8>> {
    let pattern = item_pattern(group_name, &item.id)?;
    if !pattern.is_match(&bytes) {
        return Ok(bytes);
    }

    let value = render_value(&item.value, format).map_err(|reason| {
        ConjureError::Substitution(format!(
            "item `{}` of group `{}`: {}",
            item.id, group.id, reason
        ))
    })?;

    trace!(group = group_name, item = %item.id, "substituting placeholder");
    Ok(pattern
        .replace_all(&bytes, NoExpand(value.as_slice()))
        .into_owned())
}

/// Exact `${group.item}` matcher.
fn item_pattern(group_name: &str, item_id: &str) -> Result<Regex> {
    let source = format!(
        r"\$\{{{}\.{}\}}",
        regex::escape(group_name),
        regex::escape(item_id)
    );
    Regex::new(&source).map_err(|e| {
        ConjureError::Substitution(format!(
            "cannot build matcher for `{}.{}`: {}",
            group_name, item_id, e
        ))
    })
}

/// Render an item value as template bytes.
///
/// Mappings are serialized in the document format and inserted as a block.
fn render_value(value: &ItemValue, format: DocumentFormat) -> std::result::Result<Vec<u8>, String> {
    match value {
        ItemValue::Integer(n) => Ok(n.to_string().into_bytes()),
        ItemValue::Text(s) => Ok(s.as_bytes().to_vec()),
        ItemValue::Mapping(map) => format
            .render_mapping(map)
            .map(String::into_bytes)
            .map_err(|e| format!("cannot serialize mapping as {}: {}", format, e)),
        ItemValue::Unsupported(_) => Err(format!(
            "a {} cannot be substituted; use a string, an integer or a mapping",
            value.kind()
        )),
    }
}
