use std::path::Path;

use crate::error::ExtractError;
use crate::model::{PageText, RawTable};
use crate::options::ExtractOptions;
use crate::pdf_reader::{read_pdf_pages, read_pdf_pages_from_bytes};
use crate::table_detect;

/// Trait for the text/table engine collaborator.
///
/// Opening a document is the only fatal failure; it happens before an
/// engine exists. A `detect_tables` error is recoverable: the pipeline
/// treats it as "zero tables detected" because header fields and table
/// rows are independently recoverable.
pub trait TableEngine {
    /// Raw text of the first `page_limit` pages, joined with newlines.
    fn extract_text(&self, page_limit: usize) -> String;

    /// Table grids in document order, segmented at the sensitivity the
    /// options request.
    fn detect_tables(&self, options: &ExtractOptions) -> Result<Vec<RawTable>, ExtractError>;
}

/// Default engine over lopdf/pdf-extract page text.
pub struct PdfEngine {
    pages: Vec<PageText>,
}

impl PdfEngine {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        Ok(Self {
            pages: read_pdf_pages(path)?,
        })
    }

    pub fn open_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        Ok(Self {
            pages: read_pdf_pages_from_bytes(bytes)?,
        })
    }
}

impl TableEngine for PdfEngine {
    fn extract_text(&self, page_limit: usize) -> String {
        let mut text = String::new();
        for page in self.pages.iter().take(page_limit) {
            text.push_str(&page.text);
            text.push('\n');
        }
        text
    }

    fn detect_tables(&self, options: &ExtractOptions) -> Result<Vec<RawTable>, ExtractError> {
        Ok(table_detect::detect_tables(&self.pages, options))
    }
}
