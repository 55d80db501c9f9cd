use crate::{
    BlockId, BlockSnapshot, HostError, Marker, Placement, TableSnapshot, TableSpec, TextRange,
};

/// Document body access for the anchor core
///
/// Mutations may be buffered by the host; they become durable at the next
/// [`DocumentHost::sync`]. Reads always observe earlier mutations of the same
/// caller.
pub trait DocumentHost {
    /// Paragraphs (headings included) in document order; tables are skipped
    fn blocks(&self) -> Result<Vec<BlockSnapshot>, HostError>;

    fn block_text(&self, block: BlockId) -> Result<String, HostError>;

    fn set_block_text(&mut self, block: BlockId, text: &str) -> Result<(), HostError>;

    fn set_block_style(&mut self, block: BlockId, style: &str) -> Result<(), HostError>;

    /// Insert a body-style paragraph relative to `at`, returning its handle
    fn insert_paragraph(
        &mut self,
        at: BlockId,
        text: &str,
        placement: Placement,
    ) -> Result<BlockId, HostError>;

    /// Add a paragraph at the end of the document
    fn append_paragraph(&mut self, text: &str, style: &str) -> Result<BlockId, HostError>;

    /// Remove a paragraph or table together with the markers it carries
    fn remove_block(&mut self, block: BlockId) -> Result<(), HostError>;

    /// Case-insensitive literal search over paragraphs and table cells
    fn search(&self, find: &str) -> Result<Vec<TextRange>, HostError>;

    fn replace_range(&mut self, range: &TextRange, text: &str) -> Result<(), HostError>;

    /// Markers wrapping the given paragraph
    fn markers_at(&self, block: BlockId) -> Result<Vec<Marker>, HostError>;

    /// Markers whose tag equals `tag` exactly, in document order
    fn markers_by_tag(&self, tag: &str) -> Result<Vec<Marker>, HostError>;

    fn insert_marker(&mut self, block: BlockId, tag: &str, title: &str)
        -> Result<Marker, HostError>;

    /// Re-bind an existing marker to another paragraph, keeping its id and tag
    fn move_marker(&mut self, marker: u64, to: BlockId) -> Result<Marker, HostError>;

    /// Tables in document order
    fn tables(&self) -> Result<Vec<TableSnapshot>, HostError>;

    fn insert_table(
        &mut self,
        at: BlockId,
        spec: &TableSpec,
        placement: Placement,
    ) -> Result<BlockId, HostError>;

    fn append_table(&mut self, spec: &TableSpec) -> Result<BlockId, HostError>;

    fn set_cell_text(
        &mut self,
        table: BlockId,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<(), HostError>;

    /// Commit buffered mutations
    fn sync(&mut self) -> Result<(), HostError>;
}
