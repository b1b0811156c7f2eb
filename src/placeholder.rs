//! Parsing of tagged identifiers such as `cfg.yml<dev><prod>`.
//!
//! The same grammar is used by file `output` patterns and group ids: a base
//! text followed (or interleaved) by `<token>` markers. Tokens are restricted
//! to word characters; anything else between angle brackets stays literal.

use regex::Regex;
use std::sync::LazyLock;

/// Reserved token expanding a file template over every tag of the root document.
pub const ALL_TAGS_TOKEN: &str = "tags";

static TAG_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)>").expect("Invalid tag token regex"));

/// A tagged identifier split into its base text and tag tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The input with every recognized `<token>` removed.
    pub base: String,
    /// Captured tokens in left-to-right order.
    pub tags: Vec<String>,
}

impl Placeholder {
    /// True when the only token is the reserved `tags` directive.
    pub fn is_all_tags(&self) -> bool {
        self.tags.len() == 1 && self.tags[0] == ALL_TAGS_TOKEN
    }
}

/// Split `s` into its base text and tag tokens.
///
/// # Examples
///
/// ```ignore
/// let p = parse_placeholder("name<tagA><tagB>");
/// assert_eq!(p.base, "name");
/// assert_eq!(p.tags, vec!["tagA", "tagB"]);
/// ```
pub fn parse_placeholder(s: &str) -> Placeholder {
    let tags = TAG_TOKEN_REGEX
        .captures_iter(s)
        .map(|caps| caps[1].to_string())
        .collect();
    let base = TAG_TOKEN_REGEX.replace_all(s, "").into_owned();

    Placeholder { base, tags }
}
