//! Page text reconstruction from content-stream operators.
//!
//! Line breaks are emitted whenever the text position moves to a new line,
//! not only at the end of a `BT ... ET` block, so producers that lay out a
//! whole form inside one text object still yield one line per row.

use super::loader::decode_text;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use shared_types::ExtractionError;

/// Kerning adjustments in a `TJ` array at or below this (thousandths of an
/// em) are wide enough to read as a word gap
const TJ_SPACE_THRESHOLD: f64 = -200.0;

/// Text of one page, one line per text row
pub fn page_text(document: &Document, page_id: ObjectId) -> Result<String, ExtractionError> {
    let bytes = document.get_page_content(page_id).map_err(|e| {
        ExtractionError::ParseError(format!("Failed to read content of page {:?}: {}", page_id, e))
    })?;
    let content = Content::decode(&bytes).map_err(|e| {
        ExtractionError::ParseError(format!("Failed to decode content of page {:?}: {}", page_id, e))
    })?;

    Ok(content_text(&content.operations))
}

#[derive(Default)]
struct TextWriter {
    text: String,
    /// Baseline of the current line when known
    line_y: Option<f64>,
}

impl TextWriter {
    fn break_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    fn show(&mut self, bytes: &[u8]) {
        self.text.push_str(&decode_text(bytes));
    }

    fn show_array(&mut self, items: &[Object]) {
        for item in items {
            match item {
                Object::String(bytes, _) => self.show(bytes),
                other => {
                    if number(other).is_some_and(|n| n <= TJ_SPACE_THRESHOLD)
                        && !self.text.ends_with([' ', '\n'])
                    {
                        self.text.push(' ');
                    }
                }
            }
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.text
    }
}

/// Concatenate the shown strings of `operations`, breaking lines on vertical moves
pub fn content_text(operations: &[Operation]) -> String {
    let mut writer = TextWriter::default();

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => writer.line_y = None,
            "ET" => writer.break_line(),
            "Td" | "TD" => {
                let dy = operands.get(1).and_then(number).unwrap_or(0.0);
                if dy != 0.0 {
                    writer.break_line();
                }
                writer.line_y = writer.line_y.map(|y| y + dy);
            }
            "Tm" => {
                let y = operands.get(5).and_then(number);
                if let (Some(previous), Some(y)) = (writer.line_y, y) {
                    if (previous - y).abs() > f64::EPSILON {
                        writer.break_line();
                    }
                }
                writer.line_y = y;
            }
            "T*" => writer.break_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    writer.show(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    writer.show_array(items);
                }
            }
            "'" => {
                writer.break_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    writer.show(bytes);
                }
            }
            "\"" => {
                writer.break_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    writer.show(bytes);
                }
            }
            _ => {}
        }
    }

    writer.finish()
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn text(value: &str) -> Object {
        Object::string_literal(value)
    }

    #[test]
    fn test_td_moves_start_new_lines_inside_one_block() {
        let operations = vec![
            op("BT", vec![]),
            op("Td", vec![50.into(), 700.into()]),
            op("Tj", vec![text("Lote: ABC123")]),
            op("Td", vec![0.into(), (-14).into()]),
            op("Tj", vec![text("Data: 01/05/2025")]),
            op("ET", vec![]),
        ];
        assert_eq!(content_text(&operations), "Lote: ABC123\nData: 01/05/2025\n");
    }

    #[test]
    fn test_horizontal_td_stays_on_the_line() {
        let operations = vec![
            op("BT", vec![]),
            op("Tj", vec![text("Lote:")]),
            op("Td", vec![100.into(), 0.into()]),
            op("Tj", vec![text(" ABC123")]),
            op("ET", vec![]),
        ];
        assert_eq!(content_text(&operations), "Lote: ABC123\n");
    }

    #[test]
    fn test_tm_and_next_line_operators() {
        let operations = vec![
            op("BT", vec![]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 50.into(), 700.into()]),
            op("Tj", vec![text("Hora:")]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 120.into(), 700.into()]),
            op("Tj", vec![text(" 10:30")]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 50.into(), 680.into()]),
            op("Tj", vec![text("Turno: 2")]),
            op("T*", vec![]),
            op("Tj", vec![text("Responsável:")]),
            op("'", vec![text("Observação:")]),
            op("ET", vec![]),
        ];
        assert_eq!(
            content_text(&operations),
            "Hora: 10:30\nTurno: 2\nResponsável:\nObservação:\n"
        );
    }

    #[test]
    fn test_tj_array_kerning_gap() {
        let operations = vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    text("Lote:"),
                    (-250).into(),
                    text("A"),
                    (-20).into(),
                    text("1"),
                ])],
            ),
            op("ET", vec![]),
        ];
        assert_eq!(content_text(&operations), "Lote: A1\n");
    }

    #[test]
    fn test_separate_blocks_and_empty_content() {
        let operations = vec![
            op("BT", vec![]),
            op("Tj", vec![text("Primeira")]),
            op("ET", vec![]),
            op("BT", vec![]),
            op("Tj", vec![text("Segunda")]),
            op("ET", vec![]),
        ];
        assert_eq!(content_text(&operations), "Primeira\nSegunda\n");
        assert_eq!(content_text(&[]), "");
    }
}
