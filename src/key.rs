//! Identifier column selection

/// Picks the column that identifies rows, given the header of a table.
pub trait KeyColumnStrategy: Send + Sync {
    fn find_key_column(&self, columns: &[String]) -> Option<String>;
}

/// First column whose name contains "id", ignoring case.
///
/// Loose on purpose: export headers vary (`Id`, `ParamID`, `Config Id`), at
/// the price of also matching names such as `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdSubstringMatcher;

impl KeyColumnStrategy for IdSubstringMatcher {
    fn find_key_column(&self, columns: &[String]) -> Option<String> {
        columns
            .iter()
            .find(|name| name.to_lowercase().contains("id"))
            .cloned()
    }
}

/// Exact (case-insensitive) column name match
#[derive(Debug, Clone)]
pub struct NamedColumnMatcher {
    name: String,
}

impl NamedColumnMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl KeyColumnStrategy for NamedColumnMatcher {
    fn find_key_column(&self, columns: &[String]) -> Option<String> {
        columns
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&self.name))
            .cloned()
    }
}
