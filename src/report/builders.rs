//! Primitive block constructors.
//!
//! Everything the composers emit goes through these helpers so that font sizes,
//! emphasis and column ratios stay consistent across report variants.

use std::sync::Arc;

use crate::config::ImageSize;
use crate::document::{
    Alignment, ColumnWidths, ContentBlock, ImageBlock, LabeledCell, TableBlock, TableRowSpec,
};

/// Document title size, in points.
pub const TITLE_SIZE: u32 = 15;
/// Section headings inside a report.
pub const HEADING_SIZE: u32 = 13;
/// Running text (descriptions).
pub const BODY_SIZE: u32 = 11;
/// Table cells.
pub const CELL_SIZE: u32 = 10;

/// Label column takes a third of the table.
pub const LABEL_DIVISOR: u32 = 3;
/// Speaker tables use a narrower label column.
pub const SPEAKER_DIVISOR: u32 = 4;

/// A paragraph with a single run.
///
/// Empty `content` is valid and renders as a blank line.
pub fn labeled_text(
    content: impl Into<String>,
    size: u32,
    alignment: Alignment,
    emphasis: bool,
) -> ContentBlock {
    ContentBlock::Text(LabeledCell::new(content, size, alignment, emphasis))
}

/// Bold, left aligned heading.
pub fn heading(content: impl Into<String>, size: u32) -> ContentBlock {
    labeled_text(content, size, Alignment::Left, true)
}

/// Bold, centered document title.
pub fn title(content: impl Into<String>) -> ContentBlock {
    labeled_text(content, TITLE_SIZE, Alignment::Center, true)
}

/// Empty spacer line placed after every logical group.
pub fn blank_line() -> ContentBlock {
    labeled_text("", BODY_SIZE, Alignment::Left, true)
}

/// A table row from exactly two cells, label first.
pub fn table_row(cells: [LabeledCell; 2]) -> TableRowSpec {
    let [label, value] = cells;
    TableRowSpec::new(label, value)
}

/// The usual row shape: bold label, plain value.
pub fn label_row(label: impl Into<String>, value: impl Into<String>) -> TableRowSpec {
    table_row([
        LabeledCell::new(label, CELL_SIZE, Alignment::Left, true),
        LabeledCell::new(value, CELL_SIZE, Alignment::Left, false),
    ])
}

/// Header row: both cells bold and centered.
pub fn header_row(left: impl Into<String>, right: impl Into<String>) -> TableRowSpec {
    table_row([
        LabeledCell::new(left, CELL_SIZE, Alignment::Center, true),
        LabeledCell::new(right, CELL_SIZE, Alignment::Center, true),
    ])
}

/// A two-column table whose label column is `total_width / divisor` wide.
pub fn table(rows: Vec<TableRowSpec>, divisor: u32, total_width: u32) -> ContentBlock {
    ContentBlock::Table(TableBlock::new(
        rows,
        ColumnWidths::split(total_width, divisor),
    ))
}

/// A centered picture shown at `size`.
pub fn image_block(bytes: impl Into<Arc<[u8]>>, size: ImageSize) -> ContentBlock {
    ContentBlock::Image(
        ImageBlock::new(bytes, size.width, size.height).with_alignment(Alignment::Center),
    )
}
