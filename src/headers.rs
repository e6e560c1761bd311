use std::sync::OnceLock;

use regex::Regex;

use crate::model::HeaderFields;
use crate::normalize::collapse_whitespace;

/// How many leading pages of text are scanned for header fields.
/// Headers appear early; scanning further risks false positives from
/// table content.
pub(crate) const HEADER_PAGE_COUNT: usize = 2;

struct PatternSet {
    plan_period: Vec<Regex>,
    po_number: Vec<Regex>,
    partner: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("hardcoded header regex is valid"))
        .collect()
}

fn pattern_set() -> &'static PatternSet {
    static SET: OnceLock<PatternSet> = OnceLock::new();
    SET.get_or_init(|| PatternSet {
        plan_period: compile(&[
            r"(?i)Plan\s*Period\s*[:\-]\s*([^\n\r]+)",
            r"(?i)Period\s*[:\-]\s*([^\n\r]+)",
            r"(?i)Plan\s*Window\s*[:\-]\s*([^\n\r]+)",
        ]),
        po_number: compile(&[
            r"(?i)\bPO\s*Number\s*[:\-]\s*([0-9\-]+)",
            r"(?i)\bPO\s*#\s*[:\-]?\s*([0-9\-]+)",
            r"(?i)\bPurchase\s*Order\s*(?:Number)?\s*[:\-]\s*([0-9\-]+)",
            r"(?i)\bPO\s*[:\-]\s*([0-9\-]+)",
        ]),
        partner: compile(&[
            r"(?i)Partner\s*Legal\s*Name\s*[:\-]\s*([^\n\r]+)",
            r"(?i)Partner\s*Name\s*[:\-]\s*([^\n\r]+)",
            r"(?i)Partner\s*[:\-]\s*([^\n\r]+)",
            r"(?i)Reseller\s*[:\-]\s*([^\n\r]+)",
        ]),
    })
}

/// First capture group of the first matching pattern, whitespace
/// collapsed. Empty when nothing matches.
fn first_match(text: &str, patterns: &[Regex]) -> String {
    for pattern in patterns {
        if let Some(captures) = pattern.captures(text) {
            if let Some(group) = captures.get(1) {
                return collapse_whitespace(group.as_str());
            }
        }
    }
    String::new()
}

/// Recover {partner, po_number, plan_period} from the leading pages'
/// raw text. Missing fields come back empty, not as errors.
#[must_use]
pub fn extract_headers(text: &str) -> HeaderFields {
    let set = pattern_set();
    HeaderFields {
        partner: first_match(text, &set.partner),
        po_number: first_match(text, &set.po_number),
        plan_period: first_match(text, &set.plan_period),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::extract_headers;

    #[test]
    fn extracts_all_three_fields() {
        let text = "MDF Agreement\nPO Number: 12345-6\nPlan Period: Q1 2025\nPartner: Acme Corp\n";
        let headers = extract_headers(text);
        assert_eq!(headers.po_number, "12345-6");
        assert_eq!(headers.plan_period, "Q1 2025");
        assert_eq!(headers.partner, "Acme Corp");
    }

    #[test]
    fn falls_back_to_synonym_patterns() {
        let text = "Purchase Order: 777-1\nPlan Window - FY26 H1\nReseller: Widget Partners LLC";
        let headers = extract_headers(text);
        assert_eq!(headers.po_number, "777-1");
        assert_eq!(headers.plan_period, "FY26 H1");
        assert_eq!(headers.partner, "Widget Partners LLC");
    }

    #[test]
    fn specific_patterns_win_over_loose_ones() {
        let text = "Partner Legal Name: Acme Holdings BV\nPartner: wrong\nPO # 9001";
        let headers = extract_headers(text);
        assert_eq!(headers.partner, "Acme Holdings BV");
        assert_eq!(headers.po_number, "9001");
    }

    #[test]
    fn missing_fields_are_empty_strings() {
        let headers = extract_headers("no recognizable labels here");
        assert_eq!(headers.po_number, "");
        assert_eq!(headers.plan_period, "");
        assert_eq!(headers.partner, "");
    }

    #[test]
    fn internal_whitespace_is_collapsed() {
        let headers = extract_headers("Partner:   Acme    Corp  \n");
        assert_eq!(headers.partner, "Acme Corp");
    }
}
