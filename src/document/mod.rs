//! Content tree handed to the document serializer.
//!
//! The report code only ever builds values of the types in this module; it never touches
//! a concrete file format. A [`DocumentModel`] turns the finished tree into bytes.
//!
//! The tree is deliberately shallow: a [`Document`] holds [`Section`]s and a section holds
//! a flat, ordered list of [`ContentBlock`]s. Blocks are immutable once built.

use std::sync::Arc;

use crate::error::Result;

pub mod docx;

pub use docx::DocxModel;

/// Horizontal alignment of a paragraph or image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Fully justified paragraphs.
    Justified,
}

/// A single run of text together with its styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledCell {
    text: String,
    emphasis: bool,
    size: u32,
    alignment: Alignment,
}

impl LabeledCell {
    /// Creates a cell with the given text, point size, alignment and emphasis (bold) flag.
    pub fn new(text: impl Into<String>, size: u32, alignment: Alignment, emphasis: bool) -> Self {
        Self {
            text: text.into(),
            emphasis,
            size,
            alignment,
        }
    }

    /// Returns the text of the cell.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the text is rendered in bold.
    pub fn is_emphasized(&self) -> bool {
        self.emphasis
    }

    /// Returns the font size in points.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// One table row: a label cell followed by a value cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRowSpec {
    label: LabeledCell,
    value: LabeledCell,
}

impl TableRowSpec {
    /// Creates a row from its two cells, in display order.
    pub fn new(label: LabeledCell, value: LabeledCell) -> Self {
        Self { label, value }
    }

    /// Returns the left (label) cell.
    pub fn label(&self) -> &LabeledCell {
        &self.label
    }

    /// Returns the right (value) cell.
    pub fn value(&self) -> &LabeledCell {
        &self.value
    }

    /// Returns both cells in display order.
    pub fn cells(&self) -> [&LabeledCell; 2] {
        [&self.label, &self.value]
    }
}

/// Widths of the two table columns, in twentieths of a point.
///
/// `left + right` always equals the total the widths were derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnWidths {
    left: u32,
    right: u32,
}

impl ColumnWidths {
    /// Splits `total` so the label column gets `total / divisor` and the value column the rest.
    ///
    /// A divisor of zero is treated as one (the label column takes the full width).
    pub fn split(total: u32, divisor: u32) -> Self {
        let left = total / divisor.max(1);
        Self {
            left,
            right: total - left,
        }
    }

    /// Width of the label column.
    pub fn left(&self) -> u32 {
        self.left
    }

    /// Width of the value column.
    pub fn right(&self) -> u32 {
        self.right
    }

    /// Sum of both columns.
    pub fn total(&self) -> u32 {
        self.left + self.right
    }
}

/// A two-column table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBlock {
    rows: Vec<TableRowSpec>,
    widths: ColumnWidths,
}

impl TableBlock {
    /// Creates a table from its rows and column widths.
    pub fn new(rows: Vec<TableRowSpec>, widths: ColumnWidths) -> Self {
        Self { rows, widths }
    }

    /// Returns the rows in display order.
    pub fn rows(&self) -> &[TableRowSpec] {
        &self.rows
    }

    /// Returns the column widths.
    pub fn widths(&self) -> ColumnWidths {
        self.widths
    }
}

/// An embedded picture.
///
/// The payload is reference counted so one fetched image can be placed several times
/// without copying; serializers may store such shared payloads once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlock {
    data: Arc<[u8]>,
    width: u32,
    height: u32,
    alignment: Alignment,
}

impl ImageBlock {
    /// Creates an image block displayed at `width` x `height` pixels.
    pub fn new(data: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
            alignment: Alignment::Left,
        }
    }

    /// Returns the raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the shared payload handle.
    pub fn shared_data(&self) -> &Arc<[u8]> {
        &self.data
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Sets the alignment and returns the updated block.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Individual content blocks that make up a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBlock {
    /// A paragraph made of one styled run. Empty text is a blank line.
    Text(LabeledCell),
    /// A two-column table.
    Table(TableBlock),
    /// A picture in its own paragraph.
    Image(ImageBlock),
}

impl ContentBlock {
    /// Returns the text payload if this is a text block.
    pub fn as_text(&self) -> Option<&LabeledCell> {
        match self {
            ContentBlock::Text(cell) => Some(cell),
            _ => None,
        }
    }

    /// Returns the table payload if this is a table block.
    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            ContentBlock::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the image payload if this is an image block.
    pub fn as_image(&self) -> Option<&ImageBlock> {
        match self {
            ContentBlock::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Whether this block is an empty spacer line.
    pub fn is_blank(&self) -> bool {
        matches!(self, ContentBlock::Text(cell) if cell.text().is_empty())
    }
}

/// Logical group of blocks rendered one after another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    blocks: Vec<ContentBlock>,
}

impl Section {
    /// Creates a section holding the given blocks.
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }
}

/// A complete document: sections in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section and returns the updated document.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Returns the sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates over every block of every section.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.sections.iter().flat_map(|section| section.blocks.iter())
    }
}

/// Capability that realizes a [`Document`] as a binary file.
///
/// Implementations only see the block tree; the report code never depends on the
/// binary format.
pub trait DocumentModel: Send + Sync {
    /// File extension (without dot) of produced documents.
    fn extension(&self) -> &'static str;

    /// MIME type used when the file is downloaded.
    fn content_type(&self) -> &'static str;

    /// Serializes the whole document. Nothing is written anywhere on failure.
    fn serialize(&self, document: &Document) -> Result<Vec<u8>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
