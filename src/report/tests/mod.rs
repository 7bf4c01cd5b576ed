use super::test_helpers::*;
use crate::document::{ContentBlock, TableBlock};


/// Texts of the text blocks, blanks included, in order.
fn texts(blocks: &[ContentBlock]) -> Vec<&str> {
    blocks
        .iter()
        .filter_map(ContentBlock::as_text)
        .map(|cell| cell.text())
        .collect()
}

fn tables(blocks: &[ContentBlock]) -> Vec<&TableBlock> {
    blocks.iter().filter_map(ContentBlock::as_table).collect()
}

fn labels(table: &TableBlock) -> Vec<&str> {
    table.rows().iter().map(|row| row.label().text()).collect()
}

fn position_of(blocks: &[ContentBlock], text: &str) -> usize {
    blocks
        .iter()
        .position(|b| b.as_text().is_some_and(|cell| cell.text() == text))
        .unwrap_or_else(|| panic!("no text block {text:?}"))
}
