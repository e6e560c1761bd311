mod assemble;
mod columns;
mod csv_out;
mod engine;
mod error;
mod headers;
mod model;
mod normalize;
mod options;
mod pdf_reader;
mod table_detect;
mod warning;
mod xlsx_out;

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

pub use crate::csv_out::{write_csv, write_csv_to_string};
pub use crate::engine::{PdfEngine, TableEngine};
pub use crate::error::ExtractError;
pub use crate::headers::extract_headers;
pub use crate::model::{
    ColumnMap, HeaderFields, LineItemRecord, MdfExtraction, PageText, RawTable,
};
pub use crate::normalize::{clean_amount, collapse_whitespace, truncate};
pub use crate::options::{ExtractOptions, LINE_SCALE_DEFAULT, LINE_SCALE_MAX, LINE_SCALE_MIN};
pub use crate::warning::{ExtractWarning, WarningCode};
pub use crate::xlsx_out::write_xlsx;

use crate::headers::HEADER_PAGE_COUNT;
use crate::warning::WarningCode as Code;

/// Hint surfaced whenever a document yields no table rows.
const NO_TABLES_HINT: &str = "no table rows were extracted; try adjusting the line scale \
     or verify the PDF is text-based (not a scanned image)";

/// Run the extraction pipeline against an already-opened engine.
///
/// Header fields and table records are independently recoverable:
/// a failed table detection degrades to an empty record list with a
/// warning, never an error.
pub fn extract_with_engine(
    engine: &dyn TableEngine,
    options: &ExtractOptions,
) -> Result<MdfExtraction, ExtractError> {
    options.validate()?;

    let mut warnings = Vec::new();

    let header_text = engine.extract_text(HEADER_PAGE_COUNT);
    let headers = extract_headers(&header_text);
    for (field, value) in [
        ("po_number", &headers.po_number),
        ("partner", &headers.partner),
        ("plan_period", &headers.plan_period),
    ] {
        if value.is_empty() {
            warnings.push(warning::ExtractWarning::new(
                Code::MissingHeaderField,
                format!("no pattern matched the {field} header field"),
            ));
        }
    }

    let tables = match engine.detect_tables(options) {
        Ok(tables) => tables,
        Err(error) => {
            warn!(%error, "table detection failed; continuing with zero tables");
            warnings.push(warning::ExtractWarning::new(
                Code::TableDetectionFailed,
                format!("table detection failed: {error}"),
            ));
            Vec::new()
        }
    };

    let table_count = tables.len();
    let records = assemble::assemble(&tables, &headers.plan_period, &mut warnings);

    if records.is_empty() {
        warnings.push(warning::ExtractWarning::new(
            Code::NoTablesDetected,
            NO_TABLES_HINT,
        ));
    }

    debug!(
        table_count,
        record_count = records.len(),
        "extraction finished"
    );

    Ok(MdfExtraction {
        headers,
        records,
        table_count,
        warnings,
    })
}

/// Extract header fields and line-item records from a PDF on disk.
///
/// # Errors
///
/// Fails only when the document itself cannot be opened or the options
/// are out of range; every per-table and per-row anomaly is absorbed
/// into warnings.
pub fn extract_mdf(path: &Path, options: &ExtractOptions) -> Result<MdfExtraction, ExtractError> {
    options.validate()?;
    let engine = PdfEngine::open(path)?;
    extract_with_engine(&engine, options)
}

/// Extract from an uploaded byte stream. The bytes are spooled into a
/// scoped temporary file for the duration of this call; the file is
/// removed on every exit path when the guard drops.
pub fn extract_mdf_bytes(
    bytes: &[u8],
    options: &ExtractOptions,
) -> Result<MdfExtraction, ExtractError> {
    options.validate()?;
    let mut spool = tempfile::NamedTempFile::with_suffix(".pdf")?;
    spool.write_all(bytes)?;
    spool.flush()?;
    let engine = PdfEngine::open(spool.path())?;
    extract_with_engine(&engine, options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{ExtractOptions, TableEngine, extract_with_engine};
    use crate::error::ExtractError;
    use crate::model::RawTable;
    use crate::warning::WarningCode;

    struct FixedEngine {
        text: String,
        tables: Vec<RawTable>,
        fail_detection: bool,
    }

    impl TableEngine for FixedEngine {
        fn extract_text(&self, _page_limit: usize) -> String {
            self.text.clone()
        }

        fn detect_tables(&self, _: &ExtractOptions) -> Result<Vec<RawTable>, ExtractError> {
            if self.fail_detection {
                return Err(ExtractError::PdfExtract("engine exploded".to_string()));
            }
            Ok(self.tables.clone())
        }
    }

    fn grid(rows: &[&[&str]]) -> RawTable {
        RawTable {
            page: 1,
            rows: rows
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn end_to_end_single_table_document() {
        let engine = FixedEngine {
            text: "PO Number: PO-9001\nPeriod: Q1 2025\nPartner: Acme Corp".to_string(),
            tables: vec![grid(&[
                &["Activity", "Description", "Amount"],
                &["Training", "Regional training", "$1,000.00"],
            ])],
            fail_detection: false,
        };

        let result = extract_with_engine(&engine, &ExtractOptions::default())
            .expect("extraction should succeed");
        assert_eq!(result.headers.po_number, "PO-9001");
        assert_eq!(result.headers.partner, "Acme Corp");
        assert_eq!(result.records.len(), 1);
        assert_eq!(
            result.records[0].description,
            "Training - Regional training - Q1 2025"
        );
        assert_eq!(result.records[0].amount, "1000");
    }

    #[test]
    fn detection_failure_degrades_to_zero_tables() {
        let engine = FixedEngine {
            text: "Partner: Acme Corp".to_string(),
            tables: Vec::new(),
            fail_detection: true,
        };

        let result = extract_with_engine(&engine, &ExtractOptions::default())
            .expect("headers should still be recovered");
        assert_eq!(result.headers.partner, "Acme Corp");
        assert!(result.records.is_empty());
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.code == WarningCode::TableDetectionFailed)
        );
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.code == WarningCode::NoTablesDetected)
        );
    }

    #[test]
    fn missing_header_fields_warn_but_do_not_fail() {
        let engine = FixedEngine {
            text: "nothing recognizable".to_string(),
            tables: Vec::new(),
            fail_detection: false,
        };

        let result =
            extract_with_engine(&engine, &ExtractOptions::default()).expect("should succeed");
        assert_eq!(result.headers.po_number, "");
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.code == WarningCode::MissingHeaderField)
                .count(),
            3
        );
    }

    #[test]
    fn invalid_line_scale_is_rejected() {
        let engine = FixedEngine {
            text: String::new(),
            tables: Vec::new(),
            fail_detection: false,
        };
        let options = ExtractOptions {
            line_scale: 4,
            ..ExtractOptions::default()
        };
        assert!(extract_with_engine(&engine, &options).is_err());
    }
}
