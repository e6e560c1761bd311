use tracing::debug;

use crate::columns;
use crate::model::{ColumnMap, LineItemRecord, RawTable};
use crate::normalize::{clean_amount, truncate};
use crate::warning::{ExtractWarning, WarningCode};

fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index
        .and_then(|i| row.get(i))
        .map_or("", |value| value.trim())
}

/// Assemble line-item records from detected tables in document order.
///
/// `last_map` is the continuation accumulator: a table whose own header
/// fails to resolve activity/description inherits the previous table's
/// map and treats its full row set as data (a continued table carries
/// no header row to skip). A table that cannot resolve even then drops
/// its rows and clears the accumulator, so the next valid table starts
/// clean.
pub fn assemble(
    tables: &[RawTable],
    plan_period: &str,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<LineItemRecord> {
    let mut records = Vec::new();
    let mut last_map: Option<ColumnMap> = None;

    for (index, table) in tables.iter().enumerate() {
        let table_id = index + 1;
        let width = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        if table.rows.is_empty() || width < 2 {
            debug!(table_id, page = table.page, "skipping degenerate table");
            continue;
        }

        let (mut data, mut map) = columns::resolve(table);

        if !map.is_usable() && let Some(previous) = last_map {
            map = previous;
            data = table.rows.clone();
        }

        if !map.is_usable() {
            debug!(
                table_id,
                page = table.page,
                "no activity/description columns; dropping table and continuation state"
            );
            warnings.push(
                ExtractWarning::new(
                    WarningCode::UnresolvedColumns,
                    "table has no recognizable activity/description columns; rows dropped",
                )
                .with_page(table.page)
                .with_table_id(table_id),
            );
            last_map = None;
            continue;
        }

        for row in &data {
            let activity = cell(row, map.activity);
            let descr = cell(row, map.description);
            if activity.is_empty() && descr.is_empty() {
                continue;
            }

            // repeated header row inside data, a known artifact of
            // headerless continuation pages
            let joined = format!("{activity} {descr}").trim().to_lowercase();
            if joined.starts_with("activity") || joined.starts_with("description") {
                continue;
            }

            let description = format!(
                "{} - {} - {plan_period}",
                truncate(activity),
                truncate(descr)
            );
            let amount = clean_amount(cell(row, map.amount));
            records.push(LineItemRecord {
                description,
                amount,
            });
        }

        // propagate even partially resolved maps so a later headerless
        // continuation can inherit what did resolve
        last_map = Some(map);
    }

    records
}
