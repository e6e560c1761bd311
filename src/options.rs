pub const LINE_SCALE_MIN: u32 = 5;
pub const LINE_SCALE_MAX: u32 = 60;
pub const LINE_SCALE_DEFAULT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Table detection sensitivity, 5-60. Higher values split rows into
    /// cells more aggressively; tune this when rows merge or split oddly.
    pub line_scale: u32,
    /// Minimum cells required per candidate table row.
    pub min_cols: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            line_scale: LINE_SCALE_DEFAULT,
            min_cols: 2,
        }
    }
}

impl ExtractOptions {
    pub(crate) fn validate(&self) -> Result<(), crate::error::ExtractError> {
        if !(LINE_SCALE_MIN..=LINE_SCALE_MAX).contains(&self.line_scale) {
            return Err(crate::error::ExtractError::InvalidOption(format!(
                "line_scale must be between {LINE_SCALE_MIN} and {LINE_SCALE_MAX}"
            )));
        }
        if self.min_cols < 2 {
            return Err(crate::error::ExtractError::InvalidOption(
                "min_cols must be at least 2".to_string(),
            ));
        }
        Ok(())
    }

    /// Whitespace-run width that splits a line into cells. The line
    /// scale maps onto it inversely: 15 keeps the run-of-2 default,
    /// lower values merge more, higher values split on single gaps.
    #[must_use]
    pub(crate) fn gap_width(&self) -> usize {
        (30 / self.line_scale as usize).clamp(1, 6)
    }
}
