//! Client-side search over a loaded list.

use crate::sync::resource::Resource;

/// Non-empty search text, pre-folded for case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    /// `None` for the empty string, which callers treat as "show everything".
    /// Whitespace is part of the query.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring match.
    pub fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }

    /// Exact substring match, for digits-and-symbols fields like phone numbers.
    pub fn matches_verbatim(&self, text: &str) -> bool {
        text.contains(&self.raw)
    }
}

/// Items of `items` matching `query`, in their original order.
pub fn filter_items<R: Resource>(items: &[R::Item], query: &SearchQuery) -> Vec<R::Item> {
    items
        .iter()
        .filter(|item| R::matches(item, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_empty_query_parses_to_none() {
        assert_eq!(SearchQuery::parse(""), None);
        assert_eq!(SearchQuery::parse("   ").unwrap().as_str(), "   ");
    }

    #[test]
    fn surrounding_whitespace_is_matched_literally() {
        let query = SearchQuery::parse("a ").unwrap();
        assert!(!query.matches_text("Urea"));
        assert!(query.matches_text("Neem cake powder"));
    }

    #[test]
    fn matches_text_ignores_case() {
        let query = SearchQuery::parse("EA").unwrap();
        assert!(query.matches_text("Urea"));
        assert!(!query.matches_text("DAP"));
    }

    #[test]
    fn matches_verbatim_is_case_sensitive() {
        let query = SearchQuery::parse("+91").unwrap();
        assert!(query.matches_verbatim("+919876543210"));
        assert!(!query.matches_verbatim("919876543210"));
    }
}
