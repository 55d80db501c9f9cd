//! # Anchor Resolver
//!
//! Finds the marker tagged with an anchor and opens an insertion point right
//! after the paragraph it wraps.
//!
//! An [`InsertionHandle`] is a freshly inserted empty paragraph. It must be
//! consumed in the same session: filled with content, or discarded. When
//! filling fails the placeholder is removed before the error is returned.

use crate::{AnchorId, EditorError};
use docanchor_host::{BlockId, DocumentHost, HostError, Marker, Placement, TableSpec};
use tracing::{debug, warn};

/// First marker tagged exactly with `anchor`
pub fn find_marker<H: DocumentHost>(host: &H, anchor: &AnchorId) -> Result<Marker, EditorError> {
    host.markers_by_tag(anchor.as_str())?
        .into_iter()
        .next()
        .ok_or_else(|| EditorError::AnchorNotFound(anchor.clone()))
}

/// Insert an empty paragraph immediately after the block marked `anchor`
pub fn resolve_insertion_point<H: DocumentHost>(
    host: &mut H,
    anchor: &AnchorId,
) -> Result<InsertionHandle, EditorError> {
    let marker = find_marker(host, anchor)?;
    let block = host.insert_paragraph(marker.block, "", Placement::After)?;
    debug!(anchor = %anchor, after = %marker.block, placeholder = %block, "Insertion point opened");

    Ok(InsertionHandle {
        anchor: anchor.clone(),
        block,
    })
}

/// Single-use placeholder paragraph ready to receive content
#[must_use = "an unused insertion handle leaves an empty paragraph behind"]
#[derive(Debug, PartialEq, Eq)]
pub struct InsertionHandle {
    anchor: AnchorId,
    block: BlockId,
}

impl InsertionHandle {
    pub fn anchor(&self) -> &AnchorId {
        &self.anchor
    }

    /// The placeholder paragraph
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Give the placeholder its text and style; returns the paragraph
    pub fn fill_paragraph<H: DocumentHost>(
        self,
        host: &mut H,
        text: &str,
        style: &str,
    ) -> Result<BlockId, EditorError> {
        self.fill_with(host, |host, block| {
            host.set_block_text(block, text)?;
            host.set_block_style(block, style)?;
            Ok(block)
        })
    }

    /// Replace the placeholder with a table; returns the table
    pub fn fill_table<H: DocumentHost>(
        self,
        host: &mut H,
        spec: &TableSpec,
    ) -> Result<BlockId, EditorError> {
        self.fill_with(host, |host, block| {
            host.insert_table(block, spec, Placement::Replace)
        })
    }

    /// Remove the placeholder without using it
    pub fn discard<H: DocumentHost>(self, host: &mut H) -> Result<(), EditorError> {
        host.remove_block(self.block)?;
        Ok(())
    }

    fn fill_with<H, F>(self, host: &mut H, fill: F) -> Result<BlockId, EditorError>
    where
        H: DocumentHost,
        F: FnOnce(&mut H, BlockId) -> Result<BlockId, HostError>,
    {
        match fill(host, self.block) {
            Ok(filled) => Ok(filled),
            Err(e) => {
                if let Err(cleanup) = host.remove_block(self.block) {
                    warn!(placeholder = %self.block, error = %cleanup, "Could not remove placeholder");
                }
                Err(e.into())
            }
        }
    }
}
