//! # In-memory document host
//!
//! A self-contained document model: an ordered body of paragraphs and tables,
//! markers owned by the paragraphs they wrap, and document-level settings.
//! Everything (markers and settings included) survives a JSON round trip, so
//! a saved [`MemoryDocument`] is the durable form of the document.
//!
//! Mutations apply immediately but count as uncommitted until
//! [`DocumentHost::sync`]; each non-empty sync bumps the revision.

use crate::{
    heading_style, BlockId, BlockSnapshot, DocumentHost, HostError, Marker, MemorySettings,
    Placement, TableSnapshot, TableSpec, TextLocation, TextRange, NORMAL_STYLE,
};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Top-level body node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Paragraph(Paragraph),
    Table(Table),
}

impl Node {
    pub fn id(&self) -> BlockId {
        match self {
            Node::Paragraph(p) => p.id,
            Node::Table(t) => t.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: BlockId,
    pub text: String,
    pub style: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: BlockId,
    /// Row-major cell text; every row has the same width
    pub cells: Vec<Vec<String>>,
    #[serde(default)]
    pub header_row: bool,
}

impl Table {
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            id: self.id,
            rows: self.rows(),
            cols: self.cols(),
            cells: self.cells.clone(),
            header_row: self.header_row,
        }
    }
}

/// Body of an in-memory document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryHost {
    body: Vec<Node>,
    next_id: u64,
    next_marker: u64,
    #[serde(default)]
    revision: u64,

    #[serde(skip)]
    uncommitted: usize,

    #[serde(skip)]
    sync_rejection: Option<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph with the given style (builder-style setup helper)
    pub fn push_paragraph(&mut self, text: &str, style: &str) -> BlockId {
        let paragraph = self.new_paragraph(text, style);
        let id = paragraph.id;
        self.body.push(Node::Paragraph(paragraph));
        id
    }

    pub fn push_heading(&mut self, level: u8, text: &str) -> BlockId {
        self.push_paragraph(text, &heading_style(level))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.body
    }

    /// Text of every paragraph in document order
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs().map(|p| p.text.clone()).collect()
    }

    /// Total number of markers in the document
    pub fn marker_count(&self) -> usize {
        self.paragraphs().map(|p| p.markers.len()).sum()
    }

    /// Number of committed syncs that carried mutations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Mutations since the last sync
    pub fn uncommitted(&self) -> usize {
        self.uncommitted
    }

    /// Make every following sync fail with `reason` (`None` restores syncing)
    pub fn reject_syncs(&mut self, reason: Option<String>) {
        self.sync_rejection = reason;
    }

    fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|node| match node {
            Node::Paragraph(p) => Some(p),
            Node::Table(_) => None,
        })
    }

    fn allocate_id(&mut self) -> BlockId {
        self.next_id += 1;
        BlockId(self.next_id)
    }

    fn new_paragraph(&mut self, text: &str, style: &str) -> Paragraph {
        Paragraph {
            id: self.allocate_id(),
            text: text.to_string(),
            style: style.to_string(),
            markers: Vec::new(),
        }
    }

    fn new_table(&mut self, spec: &TableSpec) -> Result<Table, HostError> {
        if spec.rows == 0 || spec.cols == 0 {
            return Err(HostError::InvalidTableShape {
                rows: spec.rows,
                cols: spec.cols,
            });
        }

        let cells = (0..spec.rows)
            .map(|row| {
                (0..spec.cols)
                    .map(|col| {
                        spec.data
                            .get(row)
                            .and_then(|r| r.get(col))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Ok(Table {
            id: self.allocate_id(),
            cells,
            header_row: spec.header_row,
        })
    }

    fn touch(&mut self) {
        self.uncommitted += 1;
    }

    fn position(&self, block: BlockId) -> Result<usize, HostError> {
        self.body
            .iter()
            .position(|node| node.id() == block)
            .ok_or(HostError::BlockNotFound(block))
    }

    fn paragraph(&self, block: BlockId) -> Result<&Paragraph, HostError> {
        match &self.body[self.position(block)?] {
            Node::Paragraph(p) => Ok(p),
            Node::Table(_) => Err(HostError::NotAParagraph(block)),
        }
    }

    fn paragraph_mut(&mut self, block: BlockId) -> Result<&mut Paragraph, HostError> {
        let index = self.position(block)?;
        match &mut self.body[index] {
            Node::Paragraph(p) => Ok(p),
            Node::Table(_) => Err(HostError::NotAParagraph(block)),
        }
    }

    fn table_mut(&mut self, block: BlockId) -> Result<&mut Table, HostError> {
        let index = self.position(block)?;
        match &mut self.body[index] {
            Node::Table(t) => Ok(t),
            Node::Paragraph(_) => Err(HostError::NotATable(block)),
        }
    }

    fn place(&mut self, at: BlockId, node: Node, placement: Placement) -> Result<(), HostError> {
        let index = self.position(at)?;
        match placement {
            Placement::Before => self.body.insert(index, node),
            Placement::After => self.body.insert(index + 1, node),
            Placement::Replace => self.body[index] = node,
        }
        self.touch();
        Ok(())
    }

    fn text_mut(&mut self, location: TextLocation) -> Result<&mut String, HostError> {
        match location {
            TextLocation::Paragraph(block) => Ok(&mut self.paragraph_mut(block)?.text),
            TextLocation::Cell { table, row, col } => self
                .table_mut(table)?
                .cells
                .get_mut(row)
                .and_then(|r| r.get_mut(col))
                .ok_or(HostError::CellOutOfRange { table, row, col }),
        }
    }
}

impl DocumentHost for MemoryHost {
    fn blocks(&self) -> Result<Vec<BlockSnapshot>, HostError> {
        Ok(self
            .paragraphs()
            .map(|p| BlockSnapshot {
                id: p.id,
                text: p.text.clone(),
                style: p.style.clone(),
            })
            .collect())
    }

    fn block_text(&self, block: BlockId) -> Result<String, HostError> {
        Ok(self.paragraph(block)?.text.clone())
    }

    fn set_block_text(&mut self, block: BlockId, text: &str) -> Result<(), HostError> {
        self.paragraph_mut(block)?.text = text.to_string();
        self.touch();
        Ok(())
    }

    fn set_block_style(&mut self, block: BlockId, style: &str) -> Result<(), HostError> {
        self.paragraph_mut(block)?.style = style.to_string();
        self.touch();
        Ok(())
    }

    fn insert_paragraph(
        &mut self,
        at: BlockId,
        text: &str,
        placement: Placement,
    ) -> Result<BlockId, HostError> {
        let paragraph = self.new_paragraph(text, NORMAL_STYLE);
        let id = paragraph.id;
        self.place(at, Node::Paragraph(paragraph), placement)?;
        Ok(id)
    }

    fn append_paragraph(&mut self, text: &str, style: &str) -> Result<BlockId, HostError> {
        let id = self.push_paragraph(text, style);
        self.touch();
        Ok(id)
    }

    fn remove_block(&mut self, block: BlockId) -> Result<(), HostError> {
        let index = self.position(block)?;
        self.body.remove(index);
        self.touch();
        Ok(())
    }

    fn search(&self, find: &str) -> Result<Vec<TextRange>, HostError> {
        if find.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = RegexBuilder::new(&regex::escape(find))
            .case_insensitive(true)
            .build()
            .map_err(|e| HostError::Search(e.to_string()))?;

        let mut hits = Vec::new();
        let mut collect = |location: TextLocation, text: &str| {
            hits.extend(pattern.find_iter(text).map(|m| TextRange {
                location,
                start: m.start(),
                end: m.end(),
            }));
        };

        for node in &self.body {
            match node {
                Node::Paragraph(p) => collect(TextLocation::Paragraph(p.id), &p.text),
                Node::Table(t) => {
                    for (row, cells) in t.cells.iter().enumerate() {
                        for (col, text) in cells.iter().enumerate() {
                            collect(TextLocation::Cell { table: t.id, row, col }, text);
                        }
                    }
                }
            }
        }

        Ok(hits)
    }

    fn replace_range(&mut self, range: &TextRange, text: &str) -> Result<(), HostError> {
        let target = self.text_mut(range.location)?;
        let valid = range.start <= range.end
            && range.end <= target.len()
            && target.is_char_boundary(range.start)
            && target.is_char_boundary(range.end);
        if !valid {
            return Err(HostError::StaleRange {
                start: range.start,
                end: range.end,
            });
        }

        target.replace_range(range.start..range.end, text);
        self.touch();
        Ok(())
    }

    fn markers_at(&self, block: BlockId) -> Result<Vec<Marker>, HostError> {
        Ok(self.paragraph(block)?.markers.clone())
    }

    fn markers_by_tag(&self, tag: &str) -> Result<Vec<Marker>, HostError> {
        Ok(self
            .paragraphs()
            .flat_map(|p| p.markers.iter())
            .filter(|m| m.tag == tag)
            .cloned()
            .collect())
    }

    fn insert_marker(
        &mut self,
        block: BlockId,
        tag: &str,
        title: &str,
    ) -> Result<Marker, HostError> {
        self.next_marker += 1;
        let marker = Marker {
            id: self.next_marker,
            tag: tag.to_string(),
            title: title.to_string(),
            block,
        };
        self.paragraph_mut(block)?.markers.push(marker.clone());
        self.touch();
        Ok(marker)
    }

    fn move_marker(&mut self, marker: u64, to: BlockId) -> Result<Marker, HostError> {
        // Validate the target before detaching anything
        self.paragraph(to)?;

        let mut moved = self
            .body
            .iter_mut()
            .find_map(|node| match node {
                Node::Paragraph(p) => p
                    .markers
                    .iter()
                    .position(|m| m.id == marker)
                    .map(|index| p.markers.remove(index)),
                Node::Table(_) => None,
            })
            .ok_or(HostError::MarkerNotFound(marker))?;

        moved.block = to;
        self.paragraph_mut(to)?.markers.push(moved.clone());
        self.touch();
        Ok(moved)
    }

    fn tables(&self) -> Result<Vec<TableSnapshot>, HostError> {
        Ok(self
            .body
            .iter()
            .filter_map(|node| match node {
                Node::Table(t) => Some(t.snapshot()),
                Node::Paragraph(_) => None,
            })
            .collect())
    }

    fn insert_table(
        &mut self,
        at: BlockId,
        spec: &TableSpec,
        placement: Placement,
    ) -> Result<BlockId, HostError> {
        // Validate the anchor before allocating an id for the table
        self.position(at)?;
        let table = self.new_table(spec)?;
        let id = table.id;
        self.place(at, Node::Table(table), placement)?;
        Ok(id)
    }

    fn append_table(&mut self, spec: &TableSpec) -> Result<BlockId, HostError> {
        let table = self.new_table(spec)?;
        let id = table.id;
        self.body.push(Node::Table(table));
        self.touch();
        Ok(id)
    }

    fn set_cell_text(
        &mut self,
        table: BlockId,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<(), HostError> {
        *self.text_mut(TextLocation::Cell { table, row, col })? = text.to_string();
        self.touch();
        Ok(())
    }

    fn sync(&mut self) -> Result<(), HostError> {
        if let Some(reason) = &self.sync_rejection {
            return Err(HostError::SyncRejected(reason.clone()));
        }
        if self.uncommitted > 0 {
            self.revision += 1;
            self.uncommitted = 0;
        }
        Ok(())
    }
}

/// A complete document: body plus settings storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub host: MemoryHost,
    #[serde(default)]
    pub settings: MemorySettings,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// New document with `title` as a level-1 heading and one body paragraph
    /// per line of `body`
    pub fn from_text(title: &str, body: Option<&str>) -> Self {
        let mut doc = Self::new();
        if !title.is_empty() {
            doc.host.push_heading(1, title);
        }
        if let Some(body) = body {
            for line in body.lines() {
                doc.host.push_paragraph(line, NORMAL_STYLE);
            }
        }
        doc
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Borrow body and settings independently
    pub fn split_mut(&mut self) -> (&mut MemoryHost, &mut MemorySettings) {
        (&mut self.host, &mut self.settings)
    }
}
