#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// One detected table region: an ordered grid of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub page: u32,
    pub rows: Vec<Vec<String>>,
}

/// Header fields recovered from the first two pages of text. A field
/// that matched no pattern stays empty; that is a valid "unknown", not
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub partner: String,
    pub po_number: String,
    pub plan_period: String,
}

/// Per-table mapping from semantic role to physical column index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub activity: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
}

impl ColumnMap {
    /// Records can only be assembled when both activity and description
    /// resolve; amount may stay absent.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.activity.is_some() && self.description.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRecord {
    pub description: String,
    pub amount: String,
}

/// Result of one document extraction: header fields plus the flat
/// record list, independently recoverable.
#[derive(Debug, Clone, PartialEq)]
pub struct MdfExtraction {
    pub headers: HeaderFields,
    pub records: Vec<LineItemRecord>,
    pub table_count: usize,
    pub warnings: Vec<crate::warning::ExtractWarning>,
}
