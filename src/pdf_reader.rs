use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::UTF_16BE;
use lopdf::Document;
use lopdf::Object;
use lopdf::content::Content;

use crate::error::ExtractError;
use crate::model::PageText;
use crate::table_detect::split_line_into_cells;

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        let bytes = if bytes.len() > 2 { &bytes[2..] } else { bytes };
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    if let Some(name) = encoding {
        let lower = name.to_ascii_lowercase();
        if lower.contains("utf16")
            || lower.contains("ucs2")
            || lower.contains("identity-h")
            || lower.contains("unicode")
        {
            let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
            if !had_errors && !utf16.is_empty() {
                return utf16.into_owned();
            }
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

/// Rank candidate extractions of the same page: reward lines that split
/// into multiple cells and currency-bearing lines, penalize broken
/// decodings. Agreement tables are the signal we care about.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut currency_lines = 0_i64;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        non_empty_lines += 1;

        if split_line_into_cells(line, 2).len() >= 2 {
            multi_cell_lines += 1;
        }

        let has_digit = line.chars().any(|ch| ch.is_ascii_digit());
        if has_digit && line.contains('$') {
            currency_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + currency_lines * 15 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: &[String]) -> String {
    candidates
        .iter()
        .max_by_key(|text| extraction_quality_score(text))
        .cloned()
        .unwrap_or_default()
}

/// Walk the page content stream directly and join text-showing
/// operators into lines. Used when pdf-extract output is unusable.
fn extract_text_from_page_content(document: &Document, page_id: lopdf::ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    text.push_str(&decode_pdf_bytes(encoding, bytes));
                }
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                    text.push(' ');
                }
                Object::Integer(value) => {
                    if *value < -100 {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn collect_pages(
    document: &Document,
    pdf_extract_text: Option<String>,
) -> Result<Vec<PageText>, ExtractError> {
    let pages_map = document.get_pages();

    let (per_page, whole) = match pdf_extract_text {
        Some(text) => {
            let split = split_text_into_pages(&text);
            if split.len() == pages_map.len() {
                (Some(split), None)
            } else {
                (None, Some(text))
            }
        }
        None => (None, None),
    };

    let mut pages = Vec::new();
    for (index, (page_no, page_id)) in pages_map.iter().enumerate() {
        let mut candidates = Vec::new();
        if let Some(text) = per_page
            .as_ref()
            .and_then(|split| split.get(index).cloned())
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }
        if let Some(text) = extract_text_from_page_content(document, *page_id) {
            candidates.push(text);
        }
        if let Some(text) = document
            .extract_text(&[*page_no])
            .ok()
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }

        // When page splitting failed and the first page looks poor, let
        // the whole-document text compete as a candidate.
        let local_best_score = candidates
            .iter()
            .map(|text| extraction_quality_score(text))
            .max()
            .unwrap_or(i64::MIN / 4);
        if index == 0
            && local_best_score < 80
            && let Some(text) = whole
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned()
        {
            candidates.push(text);
        }

        pages.push(PageText {
            page_number: *page_no,
            text: choose_best_text(&candidates),
        });
    }

    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }

    Ok(pages)
}

/// Read per-page text from a PDF on disk. An unreadable document is the
/// one fatal error of the pipeline.
pub(crate) fn read_pdf_pages(input_pdf: &Path) -> Result<Vec<PageText>, ExtractError> {
    let document = Document::load(input_pdf)?;
    let text = pdf_extract::extract_text(input_pdf).ok();
    collect_pages(&document, text)
}

pub(crate) fn read_pdf_pages_from_bytes(input_pdf: &[u8]) -> Result<Vec<PageText>, ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let text = pdf_extract::extract_text_from_mem(input_pdf).ok();
    collect_pages(&document, text)
}
