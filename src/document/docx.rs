//! `.docx` serializer.
//!
//! Writes a minimal WordprocessingML package: content types, package relationships, the
//! main document part, its relationships and one media part per distinct image payload.

use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::sync::Arc;

use quick_xml::escape::escape;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{Alignment, ContentBlock, Document, DocumentModel, ImageBlock, LabeledCell, TableBlock};
use crate::error::Result;

/// MIME type of WordprocessingML documents.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// EMUs per pixel at 96 dpi.
const EMU_PER_PIXEL: u64 = 9525;

/// A4 page, one inch margins (twentieths of a point).
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: u32 = 1440;

const CONTENT_TYPES_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><w:body>"#;

/// Serializer producing Office Open XML word-processing documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxModel;

impl DocxModel {
    /// Creates a serializer that deflates XML parts and stores media as is.
    pub fn new() -> Self {
        Self
    }

    fn file_options(&self) -> FileOptions {
        FileOptions::default().compression_method(CompressionMethod::Deflated)
    }
}

impl DocumentModel for DocxModel {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>> {
        let mut media = MediaRegistry::default();
        let body = render_body(document, &mut media);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = self.file_options();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types(&media).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(body.as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(document_rels(&media).as_bytes())?;

        // Images are already compressed
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        for entry in &media.entries {
            zip.start_file(format!("word/media/{}", entry.file_name), stored)?;
            zip.write_all(&entry.data)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

struct MediaEntry {
    data: Arc<[u8]>,
    relationship_id: String,
    file_name: String,
}

/// Media parts of the package, one per distinct payload.
#[derive(Default)]
struct MediaRegistry {
    entries: Vec<MediaEntry>,
}

impl MediaRegistry {
    /// Returns the relationship id for `data`, adding a media part on first sight.
    fn register(&mut self, data: &Arc<[u8]>) -> String {
        if let Some(existing) = self.entries.iter().find(|e| Arc::ptr_eq(&e.data, data)) {
            return existing.relationship_id.clone();
        }

        let index = self.entries.len() + 1;
        let entry = MediaEntry {
            data: Arc::clone(data),
            relationship_id: format!("rIdImg{index}"),
            file_name: format!("image{index}.{}", image_extension(data)),
        };
        let id = entry.relationship_id.clone();
        self.entries.push(entry);
        id
    }

    fn extensions(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            let ext = image_extension(&entry.data);
            if !seen.contains(&ext) {
                seen.push(ext);
            }
        }
        seen
    }
}

/// Guesses the image format from its magic bytes; unknown payloads are treated as JPEG.
fn image_extension(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.starts_with(b"BM") {
        "bmp"
    } else {
        "jpeg"
    }
}

fn image_mime(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

fn content_types(media: &MediaRegistry) -> String {
    let mut xml = String::from(CONTENT_TYPES_HEAD);
    for ext in media.extensions() {
        let _ = writeln!(
            xml,
            r#"  <Default Extension="{ext}" ContentType="{}"/>"#,
            image_mime(ext)
        );
    }
    xml.push_str(
        r#"  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    );
    xml
}

fn document_rels(media: &MediaRegistry) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for entry in &media.entries {
        let _ = writeln!(
            xml,
            r#"  <Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
            entry.relationship_id, entry.file_name
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn render_body(document: &Document, media: &mut MediaRegistry) -> String {
    let mut xml = String::from(DOCUMENT_HEAD);
    let mut drawing_id = 0u32;

    for block in document.blocks() {
        match block {
            ContentBlock::Text(cell) => push_paragraph(&mut xml, cell),
            ContentBlock::Table(table) => push_table(&mut xml, table),
            ContentBlock::Image(image) => {
                drawing_id += 1;
                let relationship_id = media.register(image.shared_data());
                push_image(&mut xml, image, &relationship_id, drawing_id);
            }
        }
    }

    let _ = write!(
        xml,
        r#"<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{PAGE_MARGIN}" w:right="{PAGE_MARGIN}" w:bottom="{PAGE_MARGIN}" w:left="{PAGE_MARGIN}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    );
    xml
}

fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Justified => "both",
    }
}

fn push_paragraph(xml: &mut String, cell: &LabeledCell) {
    let _ = write!(
        xml,
        r#"<w:p><w:pPr><w:jc w:val="{}"/></w:pPr>"#,
        justification(cell.alignment())
    );

    if !cell.text().is_empty() {
        // sizes are stored in points, WordprocessingML wants half-points
        let half_points = cell.size() * 2;
        xml.push_str("<w:r><w:rPr>");
        if cell.is_emphasized() {
            xml.push_str("<w:b/><w:bCs/>");
        }
        let _ = write!(
            xml,
            r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr>"#
        );
        for (index, line) in cell.text().split('\n').enumerate() {
            if index > 0 {
                xml.push_str("<w:br/>");
            }
            let _ = write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line));
        }
        xml.push_str("</w:r>");
    }

    xml.push_str("</w:p>");
}

fn push_table(xml: &mut String, table: &TableBlock) {
    // a w:tbl without rows is rejected by Word
    if table.rows().is_empty() {
        return;
    }

    let widths = table.widths();
    let _ = write!(
        xml,
        r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:left w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:right w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="000000"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="000000"/></w:tblBorders><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid><w:gridCol w:w="{}"/><w:gridCol w:w="{}"/></w:tblGrid>"#,
        widths.total(),
        widths.left(),
        widths.right()
    );

    for row in table.rows() {
        xml.push_str("<w:tr>");
        for (cell, width) in row.cells().into_iter().zip([widths.left(), widths.right()]) {
            let _ = write!(
                xml,
                r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/><w:vAlign w:val="center"/></w:tcPr>"#
            );
            push_paragraph(xml, cell);
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
}

fn push_image(xml: &mut String, image: &ImageBlock, relationship_id: &str, drawing_id: u32) {
    let cx = u64::from(image.width()) * EMU_PER_PIXEL;
    let cy = u64::from(image.height()) * EMU_PER_PIXEL;

    let _ = write!(
        xml,
        r#"<w:p><w:pPr><w:jc w:val="{jc}"/></w:pPr><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{drawing_id}" name="Picture {drawing_id}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="{drawing_id}" name="Picture {drawing_id}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{relationship_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        jc = justification(image.alignment()),
    );
}
