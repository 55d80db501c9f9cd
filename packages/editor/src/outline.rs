//! # Outline Builder
//!
//! Walks the document's paragraphs in order, derives an anchor for each and
//! makes sure each paragraph carries a marker tagged with that anchor. The
//! resulting outline is returned and persisted to settings storage.
//!
//! Building is idempotent: a paragraph that already carries a marker with
//! its derived anchor gets no second one. When the marker for an anchor was
//! left on another paragraph by earlier edits, it is moved to the paragraph
//! that derives the anchor now, so an anchor is never carried twice. Builds
//! never remove markers.

use crate::identity::{derive_anchor, level_from_style, normalize_text};
use crate::{AnchorId, EditorError, IdentityScheme, Session};
use docanchor_host::{DocumentHost, SettingsStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Settings key the outline is persisted under by default
pub const DEFAULT_OUTLINE_KEY: &str = "anchorOutline";

/// Prefix of the diagnostic title given to new markers
pub const DEFAULT_MARKER_TITLE_PREFIX: &str = "anchor:";

/// One block of the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    pub paragraph_id: AnchorId,
    /// Normalized text
    pub text: String,
    /// 0 for body text, 1-6 for headings
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineConfig {
    pub scheme: IdentityScheme,
    pub settings_key: String,
    pub marker_title_prefix: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            scheme: IdentityScheme::default(),
            settings_key: DEFAULT_OUTLINE_KEY.to_string(),
            marker_title_prefix: DEFAULT_MARKER_TITLE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    config: OutlineConfig,
}

impl OutlineBuilder {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Build the outline, mark unmarked paragraphs and persist the snapshot
    ///
    /// Any host error aborts the build; no partial outline is returned or
    /// persisted.
    pub fn build<H, S>(&self, host: &mut H, settings: &mut S) -> Result<Vec<OutlineItem>, EditorError>
    where
        H: DocumentHost,
        S: SettingsStore,
    {
        let mut session = Session::open(host, "build_outline");
        let blocks = session.host().blocks()?;

        let mut seen: HashMap<(String, u8), usize> = HashMap::new();
        let mut outline = Vec::with_capacity(blocks.len());
        let mut created = 0usize;
        let mut rebound = 0usize;

        for (position, block) in blocks.iter().enumerate() {
            let text = normalize_text(&block.text);
            let level = level_from_style(&block.style);
            let ordinal = match self.config.scheme {
                IdentityScheme::Positional => position,
                IdentityScheme::Occurrence => {
                    let count = seen.entry((text.clone(), level)).or_insert(0);
                    *count += 1;
                    *count - 1
                }
            };
            let anchor = derive_anchor(&text, level, ordinal);

            let tagged = session.host().markers_by_tag(anchor.as_str())?;
            let marked = tagged.iter().any(|marker| marker.block == block.id);
            if !marked {
                match tagged.first() {
                    // Left behind on another block by earlier edits
                    Some(stale) => {
                        session.host().move_marker(stale.id, block.id)?;
                        rebound += 1;
                    }
                    None => {
                        let title = format!("{}{}", self.config.marker_title_prefix, anchor);
                        session.host().insert_marker(block.id, anchor.as_str(), &title)?;
                        created += 1;
                    }
                }
            }
            debug!(anchor = %anchor, block = %block.id, level, marked, "Outline block");

            outline.push(OutlineItem {
                paragraph_id: anchor,
                text,
                level,
            });
        }

        session.commit()?;
        persist_outline(settings, &self.config.settings_key, &outline)?;

        info!(
            blocks = outline.len(),
            markers_created = created,
            markers_rebound = rebound,
            markers_reused = outline.len() - created - rebound,
            "Outline built"
        );
        Ok(outline)
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}

/// Overwrite the stored outline snapshot under `key` and flush storage
pub fn persist_outline<S: SettingsStore>(
    settings: &mut S,
    key: &str,
    outline: &[OutlineItem],
) -> Result<(), EditorError> {
    settings.set(key, serde_json::to_value(outline)?)?;
    settings.flush()?;
    Ok(())
}

/// Last persisted outline, without walking the document
pub fn load_persisted_outline<S: SettingsStore>(
    settings: &S,
    key: &str,
) -> Result<Option<Vec<OutlineItem>>, EditorError> {
    match settings.get(key) {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
