mod loader;

pub use loader::load_workbook;

use crate::heuristics::{infer_field_type, is_label_candidate};
use shared_types::{
    DocumentFormat, DocumentStructure, ExtractedField, ExtractionError, Extractor, FieldLocator,
    HeaderCell, SheetInfo,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Bold cells within this many leading rows and columns are sheet headers
pub const HEADER_SCAN_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl CellValue {
    /// Value as it should appear in an extracted field
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    pub bold: bool,
}

impl CellData {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: CellValue::Text(value.into()),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One sheet's used range. Cells are keyed by 1-based (row, column).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub max_row: u32,
    pub max_column: u32,
    pub cells: BTreeMap<(u32, u32), CellData>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Store a cell, growing the used range to cover it
    pub fn set(&mut self, row: u32, column: u32, cell: CellData) {
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
        self.cells.insert((row, column), cell);
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellData> {
        self.cells.get(&(row, column))
    }

    fn display(&self, row: u32, column: u32) -> String {
        self.get(row, column)
            .map(|cell| cell.value.display())
            .unwrap_or_default()
    }

    /// Right-hand neighbour if there is one, else the cell below
    fn neighbour_value(&self, row: u32, column: u32) -> String {
        if column < self.max_column {
            self.display(row, column + 1)
        } else if row < self.max_row {
            self.display(row + 1, column)
        } else {
            String::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

/// Detect label cells and header cells in every sheet of `workbook`
pub fn scan_workbook(workbook: &Workbook, filename: &str) -> DocumentStructure {
    let mut structure = DocumentStructure::new(DocumentFormat::Spreadsheet, filename);

    for sheet in &workbook.sheets {
        let mut headers = Vec::new();
        let before = structure.fields.len();

        // BTreeMap order is row-major
        for (&(row, column), cell) in &sheet.cells {
            let CellValue::Text(text) = &cell.value else {
                continue;
            };

            if is_label_candidate(text) {
                let label = text.trim();
                structure.fields.push(ExtractedField::new(
                    FieldLocator::Cell {
                        sheet: sheet.name.clone(),
                        row,
                        column,
                    },
                    label,
                    infer_field_type(label),
                    sheet.neighbour_value(row, column),
                    true,
                ));
            }

            if cell.bold && row <= HEADER_SCAN_LIMIT && column <= HEADER_SCAN_LIMIT {
                headers.push(HeaderCell {
                    row,
                    column,
                    value: text.clone(),
                });
            }
        }

        debug!(
            sheet = %sheet.name,
            rows = sheet.max_row,
            columns = sheet.max_column,
            fields = structure.fields.len() - before,
            headers = headers.len(),
            "Scanned sheet"
        );

        structure.sheets.push(SheetInfo {
            name: sheet.name.clone(),
            rows: sheet.max_row,
            columns: sheet.max_column,
            headers,
        });
    }

    structure
}

/// Extractor for `.xlsx` / `.xlsm` workbooks
#[derive(Debug, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for SpreadsheetExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentStructure, ExtractionError> {
        let workbook = load_workbook(path)?;
        let structure = scan_workbook(&workbook, &crate::file_name(path));

        info!(
            path = %path.display(),
            sheets = structure.sheets.len(),
            fields = structure.fields.len(),
            "Extracted spreadsheet fields"
        );

        Ok(structure)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Spreadsheet
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
