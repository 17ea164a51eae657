//! Autocomplete ordering for the search box.
//!
//! Two regimes: with no input, a preview of favorites then recent searches;
//! with input, a three-group priority order over the place namespace. The
//! ordering is a deliberate tie-break policy: exact matches outrank
//! favorites, which outrank general substring matches, regardless of
//! alphabetical or usage-frequency order.

use itertools::Itertools;

use crate::{config::SuggestConfig, gazetteer::Gazetteer};

/// Produces the ordered, capped candidate list for partial input.
#[derive(Debug, Clone, Default)]
pub struct SuggestionRanker {
    config: SuggestConfig,
}

impl SuggestionRanker {
    #[must_use]
    pub fn new(config: SuggestConfig) -> Self {
        Self { config }
    }

    /// Rank suggestions for `input`.
    ///
    /// Empty input previews up to `favorites_preview` favorites followed by
    /// up to `history_preview` recent searches, deduplicated with favorites
    /// winning. Non-empty input partitions the gazetteer namespace (which
    /// never includes the reserved home name) into exact case-insensitive
    /// matches, favorite substring matches and remaining substring matches,
    /// in that order; a name placed in an earlier group never reappears in a
    /// later one. Both regimes cap at `limit`.
    #[must_use]
    pub fn suggest(
        &self,
        gazetteer: &Gazetteer,
        favorites: &[String],
        history: &[String],
        input: &str,
    ) -> Vec<String> {
        if input.is_empty() {
            return favorites
                .iter()
                .take(self.config.favorites_preview)
                .chain(history.iter().take(self.config.history_preview))
                .unique()
                .take(self.config.limit)
                .cloned()
                .collect();
        }

        let needle = input.to_lowercase();

        let exact: Vec<&str> = gazetteer
            .names()
            .filter(|name| name.to_lowercase() == needle)
            .collect();

        let favorite_matches: Vec<&str> = favorites
            .iter()
            .map(String::as_str)
            .filter(|name| {
                name.to_lowercase().contains(&needle) && !exact.contains(name)
            })
            .collect();

        let general: Vec<&str> = gazetteer
            .names()
            .filter(|name| {
                name.to_lowercase().contains(&needle)
                    && !exact.contains(name)
                    && !favorite_matches.contains(name)
            })
            .collect();

        exact
            .into_iter()
            .chain(favorite_matches)
            .chain(general)
            .take(self.config.limit)
            .map(ToOwned::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::HOME_NAME;

    fn ranker() -> SuggestionRanker {
        SuggestionRanker::default()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input_previews_favorites_then_history() {
        let gazetteer = Gazetteer::campus();
        let favorites = strings(&["Bank", "Hospital"]);
        let history = strings(&["Canteen", "Bank", "Xerox"]);

        let suggestions = ranker().suggest(&gazetteer, &favorites, &history, "");
        // "Bank" deduplicates in favor of its favorites slot
        assert_eq!(suggestions, strings(&["Bank", "Hospital", "Canteen", "Xerox"]));
    }

    #[test]
    fn empty_input_respects_preview_caps() {
        let gazetteer = Gazetteer::campus();
        let favorites = strings(&["f1", "f2", "f3", "f4", "f5", "f6", "f7"]);
        let history = strings(&["h1", "h2", "h3", "h4", "h5", "h6", "h7"]);

        let suggestions = ranker().suggest(&gazetteer, &favorites, &history, "");
        assert_eq!(suggestions.len(), 10);
        assert_eq!(suggestions[..5], strings(&["f1", "f2", "f3", "f4", "f5"]));
        assert_eq!(suggestions[5..], strings(&["h1", "h2", "h3", "h4", "h5"]));
    }

    #[test]
    fn exact_match_outranks_favorites_and_general() {
        let gazetteer = Gazetteer::campus();
        // Favorite containing "ho" that is not a campus place
        let favorites = strings(&["Home Office"]);

        let suggestions = ranker().suggest(&gazetteer, &favorites, &[], "hospital");
        assert_eq!(suggestions[0], "Hospital");

        let suggestions = ranker().suggest(&gazetteer, &favorites, &[], "ho");
        // No exact match for "ho": favorites come first, then namespace hits
        assert_eq!(suggestions[0], "Home Office");
        assert!(suggestions.contains(&"Hospital".to_owned()));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let gazetteer = Gazetteer::campus();
        let suggestions = ranker().suggest(&gazetteer, &[], &[], "BUILDING");
        assert!(suggestions.iter().all(|name| name.to_lowercase().contains("building")));
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn earlier_groups_exclude_later_ones() {
        let gazetteer = Gazetteer::campus();
        // "Bank" is both an exact match and a favorite: it must appear once
        let favorites = strings(&["Bank"]);
        let suggestions = ranker().suggest(&gazetteer, &favorites, &[], "bank");
        assert_eq!(suggestions, strings(&["Bank"]));
    }

    #[test]
    fn capped_at_limit() {
        let gazetteer = Gazetteer::campus();
        // Every building name contains "a"; so do several favorites
        let favorites = strings(&["Plaza A", "Area B", "Cafe A"]);
        let suggestions = ranker().suggest(&gazetteer, &favorites, &[], "a");
        assert!(suggestions.len() <= 10);
    }

    #[test]
    fn reserved_home_name_is_never_suggested() {
        let gazetteer = Gazetteer::campus();
        let suggestions = ranker().suggest(&gazetteer, &[], &[], "home");
        assert!(!suggestions.contains(&HOME_NAME.to_owned()));
    }
}
