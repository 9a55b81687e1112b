use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Document families the field extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentFormat {
    Spreadsheet,
    Wordprocessing,
    Pdf,
}

impl DocumentFormat {
    /// Map a file extension (without the dot, any case) to a format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(DocumentFormat::Spreadsheet),
            "docx" => Some(DocumentFormat::Wordprocessing),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Spreadsheet => "spreadsheet",
            DocumentFormat::Wordprocessing => "wordprocessing",
            DocumentFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldType {
    Text,
    Date,
    Number,
    Textarea,
    Boolean,
    Checkbox,
    PdfField,
}

/// Position of a field inside its source document, precise enough to write
/// a value back later
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldLocator {
    /// Spreadsheet cell, 1-based row and column
    Cell { sheet: String, row: u32, column: u32 },
    /// Body paragraph, 0-based
    Paragraph { index: usize },
    /// Word table cell, all 0-based
    TableCell { table: usize, row: usize, column: usize },
    /// Text line of a PDF page, both 1-based
    PageLine { page: u32, line: usize },
    /// Interactive PDF field, dot-qualified name
    FormField { name: String },
}

impl FieldLocator {
    /// Stable identifier used by editors to refer to the field
    pub fn field_id(&self, label: &str) -> String {
        match self {
            FieldLocator::Cell { sheet, row, column } => {
                format!("{}_field_{}_{}", sheet, row, column)
            }
            FieldLocator::Paragraph { index } => {
                format!("para_{}_{}", index, label.to_lowercase().replace(' ', "_"))
            }
            FieldLocator::TableCell { table, row, column } => {
                format!("table_{}_row_{}_col_{}", table, row, column)
            }
            FieldLocator::PageLine { page, line } => format!("page_{}_line_{}", page, line),
            FieldLocator::FormField { name } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedField {
    pub id: String,
    pub locator: FieldLocator,
    pub label: String,
    pub field_type: FieldType,
    pub value: String,
    pub editable: bool,
}

impl ExtractedField {
    pub fn new(
        locator: FieldLocator,
        label: impl Into<String>,
        field_type: FieldType,
        value: impl Into<String>,
        editable: bool,
    ) -> Self {
        let label = label.into();
        Self {
            id: locator.field_id(&label),
            locator,
            label,
            field_type,
            value: value.into(),
            editable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HeaderCell {
    pub row: u32,
    pub column: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SheetInfo {
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    pub headers: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParagraphInfo {
    pub index: usize,
    pub text: String,
    pub is_heading: bool,
    pub field_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableCellInfo {
    pub row: usize,
    pub column: usize,
    pub text: String,
    pub field_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TableInfo {
    pub index: usize,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<TableCellInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageInfo {
    pub number: u32,
    pub text: String,
    pub lines: Vec<String>,
}

/// Everything the extractor learned about one document.
///
/// Only the containers belonging to `format` are filled in; the others stay
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentStructure {
    pub format: DocumentFormat,
    pub filename: String,
    pub interactive: bool,
    pub sheets: Vec<SheetInfo>,
    pub paragraphs: Vec<ParagraphInfo>,
    pub tables: Vec<TableInfo>,
    pub pages: Vec<PageInfo>,
    pub fields: Vec<ExtractedField>,
}

impl DocumentStructure {
    pub fn new(format: DocumentFormat, filename: impl Into<String>) -> Self {
        Self {
            format,
            filename: filename.into(),
            interactive: false,
            sheets: Vec::new(),
            paragraphs: Vec::new(),
            tables: Vec::new(),
            pages: Vec::new(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct InspectDocumentRequest {
    pub filename: String,
}
