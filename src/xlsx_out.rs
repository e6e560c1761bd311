use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::csv_out::OUTPUT_COLUMNS;
use crate::error::ExtractError;
use crate::model::MdfExtraction;

const SHEET_NAME: &str = "MDF Data";

/// Write the extraction as a single-sheet workbook. Amounts stay
/// strings: the canonical numeric form preserves "no amount recovered"
/// as an empty cell, distinct from zero.
pub fn write_xlsx(path: &Path, extraction: &MdfExtraction) -> Result<(), ExtractError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in (0_u16..).zip(OUTPUT_COLUMNS) {
        worksheet.write_string(0, col, name)?;
    }

    for (index, record) in extraction.records.iter().enumerate() {
        let row = u32::try_from(index + 1)
            .map_err(|_| ExtractError::InvalidOption("row index overflow".to_string()))?;
        worksheet.write_string(row, 0, &extraction.headers.po_number)?;
        worksheet.write_string(row, 1, &extraction.headers.partner)?;
        worksheet.write_string(row, 2, &record.description)?;
        worksheet.write_string(row, 3, &record.amount)?;
    }

    workbook.save(path)?;
    Ok(())
}
