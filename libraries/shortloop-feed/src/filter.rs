//! Content-safety filtering
//!
//! A keyword denylist over listing metadata. The wordlist is a policy
//! default, not a contract; hosts can supply their own terms.

use shortloop_core::ContentItem;

/// Default denylist applied to title/channel/description text
const DEFAULT_TERMS: &[&str] = &[
    "nsfw",
    "explicit",
    "xxx",
    "porn",
    "onlyfans",
    "gore",
    "graphic violence",
    "beheading",
    "18+",
    "uncensored",
    "jumpscare",
    "gambling",
];

/// Boolean content-safety predicate over item metadata.
///
/// Matching is case-insensitive substring search against the concatenated
/// title, channel name, and description. Items without any metadata pass:
/// a bare identifier has nothing to judge.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    terms: Vec<String>,
}

impl SafetyFilter {
    /// Create a filter with a custom term list
    pub fn with_terms(terms: Vec<String>) -> Self {
        Self {
            terms: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Check whether an item passes the filter
    pub fn is_safe(&self, item: &ContentItem) -> bool {
        let text = item.filter_text();
        if text.is_empty() {
            return true;
        }
        !self.terms.iter().any(|term| text.contains(term.as_str()))
    }

    /// Number of denylist terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::with_terms(DEFAULT_TERMS.iter().map(|t| (*t).to_string()).collect())
    }
}
