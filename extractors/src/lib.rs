//! Extractors Crate
//!
//! Detects fillable form fields in laboratory documents so they can be shown
//! and edited in the web UI.
//!
//! # Architecture
//!
//! - **Types**: `DocumentStructure`, `ExtractedField` and the `Extractor` trait
//!   live in the `shared-types` crate
//! - **Loaders**: read a file with a third-party parser into a small
//!   in-memory model (`Workbook`, `WordDocument`, `PdfDocument`)
//! - **Scanners**: pure functions from a model to a `DocumentStructure`
//!
//! # Available Extractors
//!
//! - `SpreadsheetExtractor`: `.xlsx` / `.xlsm` label cells and bold headers
//! - `WordprocessingExtractor`: `.docx` "label: value" paragraphs and table cells
//! - `PdfExtractor`: AcroForm fields, or "label: value" lines of page text
//! - `DocumentExtractor`: picks one of the above from the file extension
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::extract_document;
//! use std::path::Path;
//!
//! let structure = extract_document(Path::new("uploads/ficha.xlsx"))?;
//! for field in &structure.fields {
//!     println!("{} = {}", field.label, field.value);
//! }
//! ```

mod dispatch;
pub mod heuristics;
pub mod pdf;
pub mod spreadsheet;
pub mod wordprocessing;

pub use dispatch::{detect_format, extract_document, DocumentExtractor};
pub use pdf::PdfExtractor;
pub use spreadsheet::SpreadsheetExtractor;
pub use wordprocessing::WordprocessingExtractor;

// Re-export the Extractor trait from shared-types for convenience
pub use shared_types::Extractor;

use std::path::Path;

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
