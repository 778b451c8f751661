use std::collections::BTreeSet;

use crate::bookmarks::BookmarkStore;
use crate::error::Error;
use crate::model::Recipe;

/// Generic message for any upstream failure; the cause is logged, not shown.
pub const FETCH_ERROR_MESSAGE: &str = "We hit a snag fetching recipes. Please try again.";

/// Why the visible list is empty, in priority order. The variants are
/// mutually exclusive: live mode and saved mode never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// A search is in flight
    Loading,
    /// The last search completed with zero raw results
    NoMatches,
    /// Live mode with no search submitted yet
    Onboarding,
    /// Saved mode with nothing bookmarked
    NothingSaved,
}

/// Owned search and filter state.
///
/// All mutation goes through the intent handlers below; the visible list,
/// region facet, and empty-state classification are pure functions of the
/// current state, recomputed on read.
#[derive(Debug, Default)]
pub struct SearchState {
    query: String,
    results: Vec<Recipe>,
    loading: bool,
    not_found: bool,
    error: Option<String>,
    show_saved: bool,
    selected_category: Option<String>,
    selected_region: Option<String>,
    latest_request: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new search submission: trim the query, clear both filters,
    /// leave saved mode, clear any prior error, and mark loading. Returns the
    /// sequence tag identifying this request.
    pub fn begin_search(&mut self, raw_query: &str) -> u64 {
        self.query = raw_query.trim().to_string();
        self.show_saved = false;
        self.selected_category = None;
        self.selected_region = None;
        self.loading = true;
        self.not_found = false;
        self.error = None;
        self.latest_request += 1;
        self.latest_request
    }

    /// Install the outcome of the search tagged `tag`. Completions carrying
    /// any tag other than the latest are discarded, so a slow early response
    /// can never clobber a faster later one. Returns whether the outcome was
    /// applied.
    pub fn finish_search(&mut self, tag: u64, outcome: Result<Vec<Recipe>, Error>) -> bool {
        if tag != self.latest_request {
            ::log::debug!("Ignoring stale search completion (tag {})", tag);
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(results) => {
                self.not_found = results.is_empty();
                self.results = results;
            }
            Err(err) => {
                ::log::error!("Search failed: {}", err);
                self.results.clear();
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Switch between live results and saved bookmarks.
    pub fn toggle_saved_view(&mut self) {
        self.show_saved = !self.show_saved;
    }

    /// `None` means "all categories".
    pub fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    /// `None` means "all regions".
    pub fn set_region(&mut self, region: Option<String>) {
        self.selected_region = region;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_saved(&self) -> bool {
        self.show_saved
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.selected_region.as_deref()
    }

    fn active_source<'a>(&'a self, bookmarks: &'a BookmarkStore) -> Vec<&'a Recipe> {
        if self.show_saved {
            bookmarks.iter().collect()
        } else {
            self.results.iter().collect()
        }
    }

    /// Distinct non-empty regions present in the active source, sorted
    /// ascending with no duplicates.
    pub fn regions(&self, bookmarks: &BookmarkStore) -> Vec<String> {
        let mut regions = BTreeSet::new();
        for recipe in self.active_source(bookmarks) {
            if !recipe.area.trim().is_empty() {
                regions.insert(recipe.area.clone());
            }
        }
        regions.into_iter().collect()
    }

    /// The filtered view over the active source. A recipe is visible iff it
    /// matches the selected category (or none is selected) and the selected
    /// region (or none is selected).
    pub fn visible<'a>(&'a self, bookmarks: &'a BookmarkStore) -> Vec<&'a Recipe> {
        self.active_source(bookmarks)
            .into_iter()
            .filter(|recipe| {
                let category_ok = self
                    .selected_category
                    .as_deref()
                    .is_none_or(|category| recipe.category == category);
                let region_ok = self
                    .selected_region
                    .as_deref()
                    .is_none_or(|region| recipe.area == region);
                category_ok && region_ok
            })
            .collect()
    }

    /// Classify why the visible list is empty, or `None` when there is
    /// something to show (or a fetch error message takes over).
    pub fn empty_state(&self, bookmarks: &BookmarkStore) -> Option<EmptyState> {
        if self.loading {
            return Some(EmptyState::Loading);
        }
        if !self.show_saved {
            if self.not_found {
                return Some(EmptyState::NoMatches);
            }
            if self.results.is_empty() && self.error.is_none() {
                return Some(EmptyState::Onboarding);
            }
        } else if bookmarks.is_empty() {
            return Some(EmptyState::NothingSaved);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientSlot;

    fn recipe(id: &str, name: &str, category: &str, area: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            area: area.to_string(),
            instructions: String::new(),
            thumbnail: None,
            tags: None,
            source: None,
            youtube: None,
            slots: vec![IngredientSlot::default()],
        }
    }

    fn sample_results() -> Vec<Recipe> {
        vec![
            recipe("1", "Lasagne", "Pasta", "Italian"),
            recipe("2", "Ramen", "Pork", "Japanese"),
            recipe("3", "Carbonara", "Pasta", "Italian"),
            recipe("4", "Mystery Stew", "Beef", ""),
        ]
    }

    fn empty_store(dir: &tempfile::TempDir) -> BookmarkStore {
        BookmarkStore::load(dir.path().join("bookmarks.json"))
    }

    fn searched_state(results: Vec<Recipe>) -> SearchState {
        let mut state = SearchState::new();
        let tag = state.begin_search("query");
        state.finish_search(tag, Ok(results));
        state
    }

    #[test]
    fn regions_are_sorted_deduplicated_and_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = searched_state(sample_results());

        assert_eq!(
            state.regions(&empty_store(&dir)),
            vec!["Italian".to_string(), "Japanese".to_string()]
        );
    }

    #[test]
    fn filters_apply_in_either_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);

        let mut category_first = searched_state(sample_results());
        category_first.set_category(Some("Pasta".to_string()));
        category_first.set_region(Some("Italian".to_string()));

        let mut region_first = searched_state(sample_results());
        region_first.set_region(Some("Italian".to_string()));
        region_first.set_category(Some("Pasta".to_string()));

        let ids = |state: &SearchState| -> Vec<String> {
            state
                .visible(&store)
                .into_iter()
                .map(|r| r.id.clone())
                .collect()
        };
        assert_eq!(ids(&category_first), ids(&region_first));
        assert_eq!(ids(&category_first), vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn new_search_resets_filters_and_saved_mode() {
        let mut state = searched_state(sample_results());
        state.set_category(Some("Pasta".to_string()));
        state.set_region(Some("Italian".to_string()));
        state.toggle_saved_view();

        state.begin_search("  ramen  ");

        assert_eq!(state.query(), "ramen");
        assert!(!state.show_saved());
        assert_eq!(state.selected_category(), None);
        assert_eq!(state.selected_region(), None);
        assert!(state.is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = SearchState::new();
        let first = state.begin_search("slow");
        let second = state.begin_search("fast");

        assert!(state.finish_search(second, Ok(vec![recipe("2", "Ramen", "Pork", "Japanese")])));
        assert!(!state.finish_search(first, Ok(sample_results())));

        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let visible = state.visible(&store);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");
    }

    #[test]
    fn empty_states_follow_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);

        let mut state = SearchState::new();
        assert_eq!(state.empty_state(&store), Some(EmptyState::Onboarding));

        let tag = state.begin_search("zzzznotarecipe");
        assert_eq!(state.empty_state(&store), Some(EmptyState::Loading));

        state.finish_search(tag, Ok(vec![]));
        assert_eq!(state.empty_state(&store), Some(EmptyState::NoMatches));

        state.toggle_saved_view();
        assert_eq!(state.empty_state(&store), Some(EmptyState::NothingSaved));
    }

    #[test]
    fn failed_search_clears_results_and_sets_generic_message() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);

        let mut state = searched_state(sample_results());
        let tag = state.begin_search("beef");
        let err = Error::Config("unused".to_string());
        state.finish_search(tag, Err(err));

        assert!(state.visible(&store).is_empty());
        assert_eq!(state.error(), Some(FETCH_ERROR_MESSAGE));
        // An error is not the "no matches" empty state
        assert_eq!(state.empty_state(&store), None);
    }

    #[test]
    fn saved_view_is_the_active_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        let saved = recipe("9", "Moussaka", "Beef", "Greek");
        store.toggle(&saved).unwrap();

        let mut state = searched_state(sample_results());
        state.toggle_saved_view();

        let visible = state.visible(&store);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "9");
        assert_eq!(state.regions(&store), vec!["Greek".to_string()]);
    }
}
