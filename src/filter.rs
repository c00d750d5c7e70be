//! Operation-name search filter
//!
//! Case-insensitive substring match on the term as typed, surrounding
//! whitespace included; only an empty term matches every name.

use crate::record::TimedOperationRecord;

/// Filter that decides which operations to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    /// Lowercased search term (None = all operations)
    needle: Option<String>,
}

impl NameFilter {
    /// Create a filter that includes every operation
    pub fn all() -> Self {
        Self { needle: None }
    }

    /// Create a filter from a search term; an empty term matches everything
    pub fn new(term: &str) -> Self {
        if term.is_empty() {
            Self::all()
        } else {
            Self {
                needle: Some(term.to_lowercase()),
            }
        }
    }

    /// Build from an optional CLI argument
    pub fn from_option(term: Option<&str>) -> Self {
        term.map_or_else(Self::all, Self::new)
    }

    /// Check if an operation name passes the filter
    pub fn matches(&self, operation_name: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => operation_name.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Records passing the filter, in input order
    pub fn apply<'a>(&self, records: &'a [TimedOperationRecord]) -> Vec<&'a TimedOperationRecord> {
        records
            .iter()
            .filter(|r| self.matches(&r.operation_name))
            .collect()
    }

    /// Whether the filter lets everything through
    pub fn is_all(&self) -> bool {
        self.needle.is_none()
    }
}
