use super::{Paragraph, Table, WordDocument};
use shared_types::ExtractionError;
use std::path::Path;
use tracing::debug;

pub fn load_document(path: &Path) -> Result<WordDocument, ExtractionError> {
    let content = std::fs::read(path)?;
    parse_document(&content)
}

/// Parse docx bytes into body paragraphs and tables, in document order
pub fn parse_document(content: &[u8]) -> Result<WordDocument, ExtractionError> {
    let docx = docx_rs::read_docx(content)
        .map_err(|e| ExtractionError::Io(format!("Failed to read DOCX: {}", e)))?;

    let mut document = WordDocument::default();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                document.paragraphs.push(Paragraph {
                    text: paragraph_text(para),
                    style: para.property.style.as_ref().map(|s| s.val.clone()),
                });
            }
            docx_rs::DocumentChild::Table(table) => {
                document.tables.push(convert_table(table));
            }
            _ => {}
        }
    }

    debug!(
        paragraphs = document.paragraphs.len(),
        tables = document.tables.len(),
        "Loaded DOCX"
    );

    Ok(document)
}

fn convert_table(table: &docx_rs::Table) -> Table {
    let rows = table
        .rows
        .iter()
        .map(|row| match row {
            docx_rs::TableChild::TableRow(tr) => tr
                .cells
                .iter()
                .map(|cell| match cell {
                    docx_rs::TableRowChild::TableCell(tc) => cell_text(tc),
                })
                .collect(),
        })
        .collect();

    Table { rows }
}

/// Paragraphs of a cell joined by spaces
fn cell_text(cell: &docx_rs::TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|content| match content {
            docx_rs::TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(&mut text, run),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        push_run_text(&mut text, run);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
}
