use std::sync::OnceLock;

use regex::Regex;

pub(crate) const TRUNCATE_LEN: usize = 100;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("hardcoded number regex is valid"))
}

fn zero_fraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+\.0+$").expect("hardcoded fraction regex is valid"))
}

fn usd_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bUSD\b").expect("hardcoded USD regex is valid"))
}

/// Collapse internal whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            in_run = true;
            continue;
        }
        if in_run && !out.is_empty() {
            out.push(' ');
        }
        in_run = false;
        out.push(ch);
    }
    out
}

/// Cut to the first `TRUNCATE_LEN` characters and trim the result.
/// Bounds composed description length to the downstream column width.
#[must_use]
pub fn truncate(text: &str) -> String {
    let cut: String = text.chars().take(TRUNCATE_LEN).collect();
    cut.trim().to_string()
}

/// Normalize a raw amount cell into a canonical numeric string.
///
/// Strips currency markers ("USD", "$"), thousands separators and
/// non-breaking spaces, treats a fully parenthesized value as negative,
/// and collapses integer-valued fractions ("500.00" -> "500"). Returns
/// an empty string when no number is recoverable; empty is deliberately
/// distinct from zero.
#[must_use]
pub fn clean_amount(raw: &str) -> String {
    let mut s = raw.trim().replace('\u{00A0}', " ");
    s = usd_token_re().replace_all(&s, "").into_owned();
    s = s.replace(['$', ','], "").trim().to_string();

    let mut negative = false;
    if s.starts_with('(') && s.ends_with(')') {
        negative = true;
        s = s[1..s.len() - 1].trim().to_string();
    }

    let Some(found) = number_re().find(&s) else {
        return String::new();
    };

    let mut num = found.as_str().to_string();
    if negative && !num.starts_with('-') {
        num.insert(0, '-');
    }
    if zero_fraction_re().is_match(&num) {
        num.truncate(num.find('.').unwrap_or(num.len()));
    }
    num
}
