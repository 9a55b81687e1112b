mod loader;

pub use loader::{load_document, parse_document};

use crate::heuristics::{infer_field_type, is_label_candidate, split_label_value};
use shared_types::{
    DocumentFormat, DocumentStructure, ExtractedField, ExtractionError, Extractor, FieldLocator,
    ParagraphInfo, TableCellInfo, TableInfo,
};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Paragraph style id such as `Heading1`
    pub style: Option<String>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn is_heading(&self) -> bool {
        self.style
            .as_deref()
            .map(|style| style.starts_with("Heading"))
            .unwrap_or(false)
    }
}

/// Table as rows of cell texts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordDocument {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
}

/// Detect `label: value` paragraphs and label cells followed by an empty cell
pub fn scan_document(
    document: &WordDocument,
    filename: &str,
) -> Result<DocumentStructure, ExtractionError> {
    let mut structure = DocumentStructure::new(DocumentFormat::Wordprocessing, filename);

    for (index, paragraph) in document.paragraphs.iter().enumerate() {
        let text = paragraph.text.trim();
        if text.is_empty() {
            continue;
        }

        let field = split_label_value(text).map(|(label, value)| {
            ExtractedField::new(
                FieldLocator::Paragraph { index },
                label,
                infer_field_type(label),
                value,
                true,
            )
        });

        structure.paragraphs.push(ParagraphInfo {
            index,
            text: text.to_string(),
            is_heading: paragraph.is_heading(),
            field_id: field.as_ref().map(|f| f.id.clone()),
        });
        structure.fields.extend(field);
    }

    for (table_index, table) in document.tables.iter().enumerate() {
        let mut cells = Vec::new();
        let mut columns = 0;

        for (row_index, row) in table.rows.iter().enumerate() {
            if row.is_empty() {
                return Err(ExtractionError::ParseError(format!(
                    "table {} row {} has no cells",
                    table_index, row_index
                )));
            }
            columns = columns.max(row.len());

            for (column_index, text) in row.iter().enumerate() {
                let text = text.trim();
                let next_is_empty = row
                    .get(column_index + 1)
                    .map(|next| next.trim().is_empty())
                    .unwrap_or(false);

                let field = (next_is_empty && is_label_candidate(text)).then(|| {
                    ExtractedField::new(
                        FieldLocator::TableCell {
                            table: table_index,
                            row: row_index,
                            column: column_index,
                        },
                        text,
                        infer_field_type(text),
                        "",
                        true,
                    )
                });

                cells.push(TableCellInfo {
                    row: row_index,
                    column: column_index,
                    text: text.to_string(),
                    field_id: field.as_ref().map(|f| f.id.clone()),
                });
                structure.fields.extend(field);
            }
        }

        debug!(
            table = table_index,
            rows = table.rows.len(),
            columns,
            "Scanned table"
        );

        structure.tables.push(TableInfo {
            index: table_index,
            rows: table.rows.len(),
            columns,
            cells,
        });
    }

    Ok(structure)
}

/// Extractor for `.docx` documents
#[derive(Debug, Default)]
pub struct WordprocessingExtractor;

impl WordprocessingExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for WordprocessingExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentStructure, ExtractionError> {
        let document = load_document(path)?;
        let structure = scan_document(&document, &crate::file_name(path))?;

        info!(
            path = %path.display(),
            paragraphs = structure.paragraphs.len(),
            tables = structure.tables.len(),
            fields = structure.fields.len(),
            "Extracted document fields"
        );

        Ok(structure)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Wordprocessing
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::FieldType;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_paragraph_fields() {
        let document = WordDocument {
            paragraphs: vec![
                Paragraph::new("Relatório de Análise").with_style("Heading1"),
                Paragraph::new(""),
                Paragraph::new("Data da coleta: 01/05/2025"),
                Paragraph::new("Nome do Analista:"),
                Paragraph::new("Texto corrido sem rótulo"),
            ],
            tables: vec![],
        };
        let structure = scan_document(&document, "laudo.docx").unwrap();

        // Empty paragraph is skipped but its index is kept
        let indexes: Vec<usize> = structure.paragraphs.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![0, 2, 3, 4]);
        assert!(structure.paragraphs[0].is_heading);
        assert!(!structure.paragraphs[1].is_heading);

        assert_eq!(structure.fields.len(), 2);
        let date = &structure.fields[0];
        assert_eq!(date.id, "para_2_data_da_coleta");
        assert_eq!(date.label, "Data da coleta");
        assert_eq!(date.value, "01/05/2025");
        assert_eq!(date.field_type, FieldType::Date);
        assert!(date.editable);

        let analyst = &structure.fields[1];
        assert_eq!(analyst.value, "");
        assert_eq!(structure.paragraphs[2].field_id.as_deref(), Some("para_3_nome_do_analista"));
        assert_eq!(structure.paragraphs[3].field_id, None);
    }

    #[test]
    fn test_table_label_needs_empty_neighbour() {
        let document = WordDocument {
            paragraphs: vec![],
            tables: vec![Table {
                rows: vec![
                    row(&["Lote:", ""]),
                    row(&["Responsável", "Maria"]),
                    row(&["Quantidade (L)", "  ", "Observação"]),
                ],
            }],
        };
        let structure = scan_document(&document, "ficha.docx").unwrap();

        let ids: Vec<&str> = structure.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["table_0_row_0_col_0", "table_0_row_2_col_0"]);
        assert_eq!(structure.fields[1].field_type, FieldType::Number);
        assert!(structure.fields.iter().all(|f| f.value.is_empty()));

        let table = &structure.tables[0];
        assert_eq!(table.rows, 3);
        assert_eq!(table.columns, 3);
        assert_eq!(table.cells.len(), 7);
    }

    #[test]
    fn test_empty_table_row_is_parse_error() {
        let document = WordDocument {
            paragraphs: vec![],
            tables: vec![Table {
                rows: vec![row(&["Lote:", ""]), vec![]],
            }],
        };
        assert!(matches!(
            scan_document(&document, "ruim.docx"),
            Err(ExtractionError::ParseError(_))
        ));
    }
}
