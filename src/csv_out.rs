use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::MdfExtraction;

pub(crate) const OUTPUT_COLUMNS: [&str; 4] = ["PO Number", "Partner", "Description", "Amount"];

/// UTF-8 BOM so spreadsheet applications open the file with the right
/// encoding.
const BOM: &[u8] = "\u{FEFF}".as_bytes();

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    extraction: &MdfExtraction,
) -> Result<(), ExtractError> {
    writer.write_record(OUTPUT_COLUMNS)?;
    for record in &extraction.records {
        writer.write_record([
            extraction.headers.po_number.as_str(),
            extraction.headers.partner.as_str(),
            record.description.as_str(),
            record.amount.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, extraction: &MdfExtraction) -> Result<(), ExtractError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(BOM)?;
    let mut writer = WriterBuilder::new().from_writer(file);
    write_rows(&mut writer, extraction)
}

pub fn write_csv_to_string(extraction: &MdfExtraction) -> Result<String, ExtractError> {
    let mut buffer = Vec::<u8>::new();
    buffer.extend_from_slice(BOM);
    let mut writer = WriterBuilder::new().from_writer(buffer);
    write_rows(&mut writer, extraction)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::write_csv_to_string;
    use crate::model::{HeaderFields, LineItemRecord, MdfExtraction};

    fn sample() -> MdfExtraction {
        MdfExtraction {
            headers: HeaderFields {
                partner: "Acme Corp".to_string(),
                po_number: "PO-9001".to_string(),
                plan_period: "Q1 2025".to_string(),
            },
            records: vec![LineItemRecord {
                description: "Training - Regional training - Q1 2025".to_string(),
                amount: "1000".to_string(),
            }],
            table_count: 1,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn csv_starts_with_bom_and_fixed_header() {
        let csv = write_csv_to_string(&sample()).expect("csv should serialize");
        assert!(csv.starts_with("\u{FEFF}PO Number,Partner,Description,Amount\n"));
    }

    #[test]
    fn rows_join_document_headers_with_records() {
        let csv = write_csv_to_string(&sample()).expect("csv should serialize");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "PO-9001,Acme Corp,Training - Regional training - Q1 2025,1000"
        );
    }
}
