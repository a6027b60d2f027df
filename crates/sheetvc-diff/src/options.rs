//! Diff filtering options

/// Restricts what a diff reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare only these sheets (all sheets when empty)
    pub sheets: Vec<String>,
    /// Drop cell changes where both sides are blank and neither has a formula
    pub ignore_empty: bool,
}

impl DiffOptions {
    /// Options that report everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given sheet names
    pub fn sheets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheets = names.into_iter().map(Into::into).collect();
        self
    }

    /// Drop blank-to-blank cell changes
    pub fn ignore_empty(mut self, ignore: bool) -> Self {
        self.ignore_empty = ignore;
        self
    }

    pub(crate) fn includes_sheet(&self, name: &str) -> bool {
        self.sheets.is_empty() || self.sheets.iter().any(|s| s == name)
    }
}
