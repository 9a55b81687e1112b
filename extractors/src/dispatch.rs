use crate::pdf::PdfExtractor;
use crate::spreadsheet::SpreadsheetExtractor;
use crate::wordprocessing::WordprocessingExtractor;
use shared_types::{DocumentFormat, DocumentStructure, ExtractionError, Extractor};
use std::path::Path;
use tracing::info;

/// Select the document format from the file extension
pub fn detect_format(path: &Path) -> Result<DocumentFormat, ExtractionError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    DocumentFormat::from_extension(extension).ok_or_else(|| {
        ExtractionError::UnsupportedFormat(if extension.is_empty() {
            format!("{} has no file extension", path.display())
        } else {
            format!(".{}", extension)
        })
    })
}

/// Routes a file to the extractor for its format
#[derive(Debug, Default)]
pub struct DocumentExtractor {
    spreadsheet: SpreadsheetExtractor,
    wordprocessing: WordprocessingExtractor,
    pdf: PdfExtractor,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extractor_for(&self, format: DocumentFormat) -> &dyn Extractor {
        match format {
            DocumentFormat::Spreadsheet => &self.spreadsheet,
            DocumentFormat::Wordprocessing => &self.wordprocessing,
            DocumentFormat::Pdf => &self.pdf,
        }
    }

    pub fn extract(&self, path: &Path) -> Result<DocumentStructure, ExtractionError> {
        let format = detect_format(path)?;
        info!(path = %path.display(), format = format.as_str(), "Extracting document fields");

        if !path.is_file() {
            return Err(ExtractionError::Io(format!(
                "{} does not exist or is not a file",
                path.display()
            )));
        }

        self.extractor_for(format).extract(path)
    }
}

/// Extract form fields from the document at `path`
pub fn extract_document(path: &Path) -> Result<DocumentStructure, ExtractionError> {
    DocumentExtractor::new().extract(path)
}
