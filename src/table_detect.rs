use crate::model::{PageText, RawTable};
use crate::options::ExtractOptions;

/// Split a text line into cells. Tabs always split; a run of `gap` or
/// more spaces splits; shorter runs stay inside the cell.
pub(crate) fn split_line_into_cells(line: &str, gap: usize) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let flush = |current: &mut String, cells: &mut Vec<String>| {
        if !current.trim().is_empty() {
            cells.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in trimmed.chars() {
        if ch == '\t' {
            flush(&mut current, &mut cells);
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= gap {
                flush(&mut current, &mut cells);
                continue;
            }
            if whitespace_run == 1 {
                current.push(' ');
            }
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }

    flush(&mut current, &mut cells);
    cells
}

fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Segment one page's text into table grids: consecutive lines that
/// split into at least `min_cols` cells form one table region.
fn detect_tables_in_page(page: &PageText, options: &ExtractOptions) -> Vec<RawTable> {
    let gap = options.gap_width();
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush_current = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<RawTable>| {
        if rows.is_empty() {
            return;
        }
        tables.push(RawTable {
            page: page.page_number,
            rows: std::mem::take(rows),
        });
    };

    for line in page.text.lines() {
        let mut cells = split_line_into_cells(line, gap);
        if cells.len() < options.min_cols {
            // Single-space fallback for lines the gap rule keeps merged,
            // guarded against prose sentences.
            let soft_cells = soft_split_line_into_cells(line);
            let has_numeric = soft_cells
                .iter()
                .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
            let looks_like_sentence = ['.', '!', '?']
                .iter()
                .any(|punctuation| line.trim_end().ends_with(*punctuation));
            if soft_cells.len() >= options.min_cols
                && !looks_like_sentence
                && (has_numeric || soft_cells.len() <= 6)
            {
                cells = soft_cells;
            }
        }

        if cells.len() >= options.min_cols {
            current_rows.push(cells);
        } else {
            flush_current(&mut current_rows, &mut tables);
        }
    }

    flush_current(&mut current_rows, &mut tables);
    tables
}

/// Detect table grids across all pages, in document order.
pub(crate) fn detect_tables(pages: &[PageText], options: &ExtractOptions) -> Vec<RawTable> {
    let mut tables = Vec::new();
    for page in pages {
        tables.extend(detect_tables_in_page(page, options));
    }
    tables
}
