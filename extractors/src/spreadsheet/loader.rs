use super::{CellData, CellValue, Workbook, Worksheet};
use shared_types::ExtractionError;
use std::path::Path;
use tracing::debug;

/// Read an xlsx workbook into the in-memory model
pub fn load_workbook(path: &Path) -> Result<Workbook, ExtractionError> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        ExtractionError::Io(format!("Failed to read workbook {}: {}", path.display(), e))
    })?;

    let mut workbook = Workbook::default();
    for source in book.get_sheet_collection() {
        let mut sheet = Worksheet::new(source.get_name());
        let (max_column, max_row) = source.get_highest_column_and_row();

        for cell in source.get_cell_collection() {
            let coordinate = cell.get_coordinate();
            let row = *coordinate.get_row_num();
            let column = *coordinate.get_col_num();

            let value = convert_value(cell.get_data_type(), &cell.get_value());
            let bold = cell
                .get_style()
                .get_font()
                .map(|font| *font.get_bold())
                .unwrap_or(false);

            sheet.set(row, column, CellData { value, bold });
        }

        // Formatting can stretch the used range past the last stored value
        sheet.max_row = sheet.max_row.max(max_row);
        sheet.max_column = sheet.max_column.max(max_column);

        debug!(
            sheet = %sheet.name,
            cells = sheet.cells.len(),
            "Loaded worksheet"
        );
        workbook.sheets.push(sheet);
    }

    Ok(workbook)
}

fn convert_value(data_type: &str, raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Empty;
    }

    match data_type {
        "n" => raw
            .parse::<f64>()
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::Text(raw.to_string())),
        "b" => CellValue::Boolean(raw.eq_ignore_ascii_case("true") || raw == "1"),
        _ => CellValue::Text(raw.to_string()),
    }
}
