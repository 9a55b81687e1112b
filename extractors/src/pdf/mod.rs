mod loader;
mod text;

pub use loader::load_pdf;
pub use text::content_text;

use crate::heuristics::{infer_field_type, match_type_rule, split_label_value, FORM_FIELD_TYPE_RULES};
use shared_types::{
    DocumentFormat, DocumentStructure, ExtractedField, ExtractionError, Extractor, FieldLocator,
    FieldType, PageInfo,
};
use std::path::Path;
use tracing::{debug, info};

/// Line labels at or above this many characters are treated as prose
pub const MAX_LINE_LABEL_CHARS: usize = 50;

/// Interactive AcroForm field after flattening `/Kids`
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Dot-qualified name
    pub name: String,
    pub value: Option<String>,
    /// `/FT` entry, inherited from ancestors when absent
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDocument {
    pub form_fields: Vec<FormField>,
    pub pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn is_interactive(&self) -> bool {
        !self.form_fields.is_empty()
    }
}

/// Type of an interactive field from its name first, then its `/FT`
pub fn infer_form_field_type(name: &str, kind: Option<&str>) -> FieldType {
    if let Some(field_type) = match_type_rule(&FORM_FIELD_TYPE_RULES, name) {
        return field_type;
    }

    match kind {
        Some("Btn") => FieldType::Checkbox,
        Some("Tx") => FieldType::Text,
        Some(_) => FieldType::PdfField,
        None => FieldType::Text,
    }
}

/// Enumerate form fields of an interactive PDF, else scan page lines
pub fn scan_pdf(document: &PdfDocument, filename: &str) -> DocumentStructure {
    let mut structure = DocumentStructure::new(DocumentFormat::Pdf, filename);
    structure.interactive = document.is_interactive();

    for page in &document.pages {
        let lines: Vec<String> = page.text.lines().map(str::to_string).collect();

        if !structure.interactive {
            let before = structure.fields.len();
            for (offset, line) in lines.iter().enumerate() {
                let Some((label, value)) = split_label_value(line) else {
                    continue;
                };
                if label.chars().count() >= MAX_LINE_LABEL_CHARS {
                    continue;
                }

                structure.fields.push(ExtractedField::new(
                    FieldLocator::PageLine {
                        page: page.number,
                        line: offset + 1,
                    },
                    label,
                    infer_field_type(label),
                    value,
                    true,
                ));
            }
            debug!(
                page = page.number,
                lines = lines.len(),
                fields = structure.fields.len() - before,
                "Scanned page"
            );
        }

        structure.pages.push(PageInfo {
            number: page.number,
            text: page.text.clone(),
            lines,
        });
    }

    for field in &document.form_fields {
        structure.fields.push(ExtractedField::new(
            FieldLocator::FormField {
                name: field.name.clone(),
            },
            field.name.clone(),
            infer_form_field_type(&field.name, field.kind.as_deref()),
            field.value.clone().unwrap_or_default(),
            false,
        ));
    }

    structure
}

/// Extractor for `.pdf` documents
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentStructure, ExtractionError> {
        let document = load_pdf(path)?;
        let structure = scan_pdf(&document, &crate::file_name(path));

        info!(
            path = %path.display(),
            pages = structure.pages.len(),
            interactive = structure.interactive,
            fields = structure.fields.len(),
            "Extracted PDF fields"
        );

        Ok(structure)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, text: &str) -> PdfPage {
        PdfPage {
            number,
            text: text.to_string(),
        }
    }

    fn form_field(name: &str, value: Option<&str>, kind: Option<&str>) -> FormField {
        FormField {
            name: name.to_string(),
            value: value.map(str::to_string),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_line_fields() {
        let document = PdfDocument {
            form_fields: vec![],
            pages: vec![
                page(1, "LAUDO DE ANÁLISE\nLote: ABC123\nHora: 10:30"),
                page(2, "Observação:\n"),
            ],
        };
        let structure = scan_pdf(&document, "laudo.pdf");

        assert!(!structure.interactive);
        assert_eq!(structure.pages.len(), 2);
        assert_eq!(structure.pages[0].lines.len(), 3);

        let lot = &structure.fields[0];
        assert_eq!(lot.id, "page_1_line_2");
        assert_eq!(lot.label, "Lote");
        assert_eq!(lot.value, "ABC123");
        assert_eq!(lot.field_type, FieldType::Text);
        assert!(lot.editable);

        let hour = &structure.fields[1];
        assert_eq!(hour.label, "Hora");
        assert_eq!(hour.value, "10:30");

        let note = &structure.fields[2];
        assert_eq!(note.id, "page_2_line_1");
        assert_eq!(note.field_type, FieldType::Textarea);
        assert_eq!(note.value, "");
    }

    #[test]
    fn test_long_labels_are_prose() {
        let long = format!("{}: fim", "a".repeat(MAX_LINE_LABEL_CHARS));
        let short = format!("{}: fim", "a".repeat(MAX_LINE_LABEL_CHARS - 1));
        let document = PdfDocument {
            form_fields: vec![],
            pages: vec![page(1, &format!("{}\n{}", long, short))],
        };
        let structure = scan_pdf(&document, "texto.pdf");

        assert_eq!(structure.fields.len(), 1);
        assert_eq!(structure.fields[0].id, "page_1_line_2");
    }

    #[test]
    fn test_interactive_pdf_skips_line_scan() {
        let document = PdfDocument {
            form_fields: vec![
                form_field("data_coleta", Some("01/05/2025"), Some("Tx")),
                form_field("aprovado", None, Some("Btn")),
                form_field("check_limpeza", Some("Off"), Some("Btn")),
                form_field("turno", Some("2"), Some("Ch")),
                form_field("lote", Some("A1"), Some("Tx")),
                form_field("assinatura", None, Some("Btn")),
            ],
            pages: vec![page(1, "Lote: ABC123")],
        };
        let structure = scan_pdf(&document, "form.pdf");

        assert!(structure.interactive);
        assert_eq!(structure.pages[0].lines, vec!["Lote: ABC123".to_string()]);
        assert_eq!(structure.fields.len(), 6);
        assert!(structure.fields.iter().all(|f| !f.editable));

        let types: Vec<FieldType> = structure.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(
            types,
            vec![
                FieldType::Date,
                FieldType::Boolean,
                FieldType::Checkbox,
                FieldType::PdfField,
                FieldType::Text,
                FieldType::Checkbox,
            ]
        );
        assert_eq!(structure.fields[0].id, "data_coleta");
        assert_eq!(structure.fields[0].value, "01/05/2025");
        assert_eq!(structure.fields[1].value, "");
    }
}
