use log::{debug, info};

/// What a title search resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query: show every entry
    All,
    /// The only match equals the query ignoring case
    ExactHit(String),
    Matches(Vec<String>),
    NoMatch,
}

/// Service for case-insensitive title search
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchService;

impl SearchService {
    /// Create a new search service
    pub fn new() -> Self {
        Self
    }

    /// Match `query` against `titles` by case-insensitive containment.
    ///
    /// The exact-hit check only applies when there is a single match, so a
    /// query equal to one title that is also a substring of another still
    /// yields the results list.
    pub fn search(&self, titles: Vec<String>, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty search query received");
            return SearchOutcome::All;
        }

        let needle = query.to_lowercase();
        let mut matches: Vec<String> = titles
            .into_iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .collect();

        info!("Search for '{}' matched {} titles", query, matches.len());

        if matches.len() == 1 && matches[0].to_lowercase() == needle {
            return SearchOutcome::ExactHit(matches.remove(0));
        }
        if matches.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Matches(matches)
        }
    }
}
