//! # Operation Applier
//!
//! Applies a batch of [`Operation`]s strictly in order. Each operation runs in
//! its own [`Session`] and is synced before the next one starts.
//!
//! Batches are not transactional: the first failure stops the batch and is
//! returned as a [`BatchError`]; operations applied before it stay applied.

use crate::operations::{clamp_heading_level, table_spec};
use crate::resolver::{find_marker, resolve_insertion_point};
use crate::{AnchorId, BatchError, EditorError, Operation, Session};
use docanchor_host::{
    heading_style, BlockId, DocumentHost, TableSnapshot, TextLocation, NORMAL_STYLE,
};
use tracing::{debug, info};

/// What a single operation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpEffect {
    /// New paragraph or table
    pub inserted: Option<BlockId>,
    pub replacements: usize,
    pub removed: usize,
}

impl OpEffect {
    fn inserted(block: BlockId) -> Self {
        Self {
            inserted: Some(block),
            ..Self::default()
        }
    }

    fn removed(count: usize) -> Self {
        Self {
            removed: count,
            ..Self::default()
        }
    }
}

/// Totals for a fully applied batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub inserted: Vec<BlockId>,
    pub replacements: usize,
    pub removed: usize,
}

impl ApplyReport {
    /// Fold one operation's effect into the totals
    pub fn record(&mut self, effect: OpEffect) {
        self.applied += 1;
        self.inserted.extend(effect.inserted);
        self.replacements += effect.replacements;
        self.removed += effect.removed;
    }
}

/// Apply `ops` in order, stopping at the first failure
pub fn apply_ops<H: DocumentHost>(host: &mut H, ops: &[Operation]) -> Result<ApplyReport, BatchError> {
    info!(operations = ops.len(), "Applying batch");
    let mut report = ApplyReport::default();

    for (index, op) in ops.iter().enumerate() {
        let effect = op.apply(host).map_err(|source| BatchError {
            index,
            kind: op.kind(),
            source,
        })?;
        report.record(effect);
    }

    info!(
        applied = report.applied,
        replacements = report.replacements,
        removed = report.removed,
        "Batch applied"
    );
    Ok(report)
}

impl Operation {
    /// Apply this operation as one unit of work
    pub fn apply<H: DocumentHost>(&self, host: &mut H) -> Result<OpEffect, EditorError> {
        let mut session = Session::open(host, self.kind());
        let effect = self.dispatch(session.host())?;
        session.commit()?;

        debug!(operation = self.kind(), ?effect, "Operation applied");
        Ok(effect)
    }

    fn dispatch<H: DocumentHost>(&self, host: &mut H) -> Result<OpEffect, EditorError> {
        match self {
            Operation::ReplaceText { find, replace } => replace_text(host, find, replace),

            Operation::AddHeading {
                text,
                level,
                after_paragraph_id,
            } => {
                let style = heading_style(clamp_heading_level(*level));
                place_paragraph(host, after_paragraph_id.as_ref(), text, &style)
            }

            Operation::AddParagraph {
                text,
                after_paragraph_id,
            } => place_paragraph(host, after_paragraph_id.as_ref(), text, NORMAL_STYLE),

            Operation::InsertTable {
                after_paragraph_id,
                rows,
                cols,
                data,
                add_header_row,
            } => {
                let spec = table_spec(*rows, *cols, data.as_deref(), *add_header_row);
                let table = match after_paragraph_id {
                    Some(anchor) => resolve_insertion_point(host, anchor)?.fill_table(host, &spec)?,
                    None => host.append_table(&spec)?,
                };
                Ok(OpEffect::inserted(table))
            }

            Operation::EditTable { table_index, data } => {
                let table = nth_table(host, *table_index)?;
                for (row, cells) in data.iter().enumerate().take(table.rows) {
                    for (col, text) in cells.iter().enumerate().take(table.cols) {
                        host.set_cell_text(table.id, row, col, text)?;
                    }
                }
                Ok(OpEffect::default())
            }

            Operation::EditCell {
                table_index,
                cell_row,
                cell_col,
                cell_text,
            } => {
                let table = nth_table(host, *table_index)?;
                check_index("table row", *cell_row, table.rows)?;
                check_index("table column", *cell_col, table.cols)?;
                host.set_cell_text(table.id, *cell_row, *cell_col, cell_text)?;
                Ok(OpEffect::default())
            }

            Operation::RemoveTable { table_index } => {
                let table = nth_table(host, *table_index)?;
                host.remove_block(table.id)?;
                Ok(OpEffect::removed(1))
            }

            Operation::RemoveParagraph { paragraph_id, find } => {
                remove_paragraphs(host, paragraph_id.as_ref(), find.as_deref())
            }
        }
    }
}

fn replace_text<H: DocumentHost>(host: &mut H, find: &str, replace: &str) -> Result<OpEffect, EditorError> {
    let hits = host.search(find)?;
    if hits.is_empty() {
        debug!(find, "No matches to replace");
    }

    // Back to front so earlier offsets in the same paragraph stay valid
    for hit in hits.iter().rev() {
        host.replace_range(hit, replace)?;
    }

    Ok(OpEffect {
        replacements: hits.len(),
        ..OpEffect::default()
    })
}

fn place_paragraph<H: DocumentHost>(
    host: &mut H,
    after: Option<&AnchorId>,
    text: &str,
    style: &str,
) -> Result<OpEffect, EditorError> {
    let block = match after {
        Some(anchor) => resolve_insertion_point(host, anchor)?.fill_paragraph(host, text, style)?,
        None => host.append_paragraph(text, style)?,
    };
    Ok(OpEffect::inserted(block))
}

fn remove_paragraphs<H: DocumentHost>(
    host: &mut H,
    anchor: Option<&AnchorId>,
    find: Option<&str>,
) -> Result<OpEffect, EditorError> {
    match (anchor, find) {
        (Some(anchor), _) => {
            let marker = find_marker(host, anchor)?;
            host.remove_block(marker.block)?;
            Ok(OpEffect::removed(1))
        }
        (None, Some(find)) => {
            let mut blocks: Vec<BlockId> = host
                .search(find)?
                .into_iter()
                .filter_map(|hit| match hit.location {
                    TextLocation::Paragraph(block) => Some(block),
                    TextLocation::Cell { .. } => None,
                })
                .collect();
            // Hits come in document order, so repeats are adjacent
            blocks.dedup();

            for block in &blocks {
                host.remove_block(*block)?;
            }
            Ok(OpEffect::removed(blocks.len()))
        }
        (None, None) => Err(EditorError::InvalidOperation(
            "remove_paragraph needs paragraph_id or find".to_string(),
        )),
    }
}

fn nth_table<H: DocumentHost>(host: &H, index: usize) -> Result<TableSnapshot, EditorError> {
    let mut tables = host.tables()?;
    check_index("table", index, tables.len())?;
    Ok(tables.swap_remove(index))
}

fn check_index(target: &'static str, index: usize, len: usize) -> Result<(), EditorError> {
    if index < len {
        Ok(())
    } else {
        Err(EditorError::TargetIndexOutOfRange { target, index, len })
    }
}
