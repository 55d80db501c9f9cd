//! # Anchor identity
//!
//! Derives the identifier bound to a block when an outline is built:
//!
//! ```text
//! payload = normalize(text) + "|" + level + "|" + ordinal
//! anchor  = ("h" + level | "p") + "-" + hex8(hash(payload))
//! ```
//!
//! `hash` is the 31-multiplier polynomial over UTF-16 code units with 32-bit
//! wraparound, so identifiers match those produced by hosts working on
//! UTF-16 text. The ordinal depends on the [`IdentityScheme`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an outline block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Heading level encoded in the prefix (`Some(0)` for body text), if the
    /// identifier is well-formed
    pub fn level_hint(&self) -> Option<u8> {
        let (prefix, digest) = self.0.split_once('-')?;
        if digest.len() != 8 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match prefix {
            "p" => Some(0),
            _ => prefix
                .strip_prefix('h')
                .and_then(|level| level.parse::<u8>().ok())
                .filter(|level| (1..=6).contains(level)),
        }
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AnchorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnchorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AnchorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What the ordinal folded into an anchor counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityScheme {
    /// Position of the block in the document. Any insertion or removal before
    /// a block changes its anchor on the next build.
    #[default]
    Positional,

    /// Occurrence count of the same (text, level) pair earlier in the
    /// document. Unrelated edits leave anchors untouched.
    Occurrence,
}

/// Trim and collapse whitespace runs to a single space
pub fn normalize_text(text: &str) -> String {
    text.split(is_host_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace as UTF-16 hosts see it (ECMAScript `\s`): Unicode White_Space
/// plus U+FEFF, minus U+0085
fn is_host_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Heading depth from a style name: 1-6 for "heading N" styles, else 0
pub fn level_from_style(style: &str) -> u8 {
    let style = style.to_lowercase();
    (1..=6u8)
        .find(|level| style.contains(&format!("heading {}", level)))
        .unwrap_or(0)
}

/// Derive the anchor for a block. Pure and total.
pub fn derive_anchor(text: &str, level: u8, ordinal: usize) -> AnchorId {
    let payload = format!("{}|{}|{}", normalize_text(text), level, ordinal);
    let prefix = if level > 0 {
        format!("h{}", level)
    } else {
        "p".to_string()
    };
    AnchorId(format!("{}-{:08x}", prefix, rolling_hash(&payload)))
}

fn rolling_hash(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(derive_anchor("", 0, 0).as_str(), "p-00392168");
        assert_eq!(derive_anchor("Introduction", 1, 0).as_str(), "h1-81442463");
        assert_eq!(derive_anchor("Hello world", 0, 3).as_str(), "p-9bc4ba0f");
        assert_eq!(derive_anchor("Café", 0, 1).as_str(), "p-f646072a");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for (text, level, ordinal) in [("a", 0, 0), ("Budget", 2, 7), ("  x  ", 6, 100)] {
            assert_eq!(
                derive_anchor(text, level, ordinal),
                derive_anchor(text, level, ordinal)
            );
        }
    }

    #[test]
    fn test_whitespace_is_normalized_before_hashing() {
        assert_eq!(
            derive_anchor("  Hello \t\n world ", 0, 3),
            derive_anchor("Hello world", 0, 3)
        );
        assert_eq!(normalize_text(" a  b\tc "), "a b c");
    }

    #[test]
    fn test_whitespace_set_matches_utf16_hosts() {
        assert_eq!(normalize_text("\u{feff}Title\u{feff}"), "Title");
        assert_eq!(normalize_text("a\u{feff}\u{a0}b"), "a b");
        assert_eq!(normalize_text("a\u{2028}b\u{3000}c"), "a b c");
        // NEL is text, not whitespace, for these hosts
        assert_eq!(normalize_text("a\u{85}b"), "a\u{85}b");
        assert_eq!(
            derive_anchor("\u{feff}Introduction", 1, 0),
            derive_anchor("Introduction", 1, 0)
        );
    }

    #[test]
    fn test_ordinal_and_level_change_identity() {
        let base = derive_anchor("Same", 0, 1);
        assert_ne!(base, derive_anchor("Same", 0, 2));
        assert_ne!(base, derive_anchor("Same", 1, 1));
    }

    #[test]
    fn test_level_from_style() {
        assert_eq!(level_from_style("Heading 1"), 1);
        assert_eq!(level_from_style("heading 6"), 6);
        assert_eq!(level_from_style("Custom HEADING 3 Alt"), 3);
        assert_eq!(level_from_style("Normal"), 0);
        assert_eq!(level_from_style(""), 0);
        assert_eq!(level_from_style("Heading 7"), 0);
    }

    #[test]
    fn test_level_hint() {
        assert_eq!(derive_anchor("x", 4, 0).level_hint(), Some(4));
        assert_eq!(derive_anchor("x", 0, 0).level_hint(), Some(0));
        assert_eq!(AnchorId::from("nonexistent").level_hint(), None);
        assert_eq!(AnchorId::from("h9-00000000").level_hint(), None);
    }
}
