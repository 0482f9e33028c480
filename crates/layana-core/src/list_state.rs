//! Per-view list state: page, page size, search, sort and the current page.
//!
//! Plain data; the dashboard wraps one instance per mounted view in a
//! signal and throws it away when the view unmounts.

use crate::domain::Resource;
use crate::repository::{Page, PageQuery, Pagination, Scope, SortDirection};

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub scope: Option<Scope>,
    /// Query the current items were fetched with
    loaded: Option<PageQuery>,
}

impl<T: Resource> ListState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            sort_by: None,
            sort_direction: SortDirection::Asc,
            items: Vec::new(),
            pagination: None,
            scope: None,
            loaded: None,
        }
    }

    /// Query for the page currently selected
    pub fn query(&self) -> PageQuery {
        let search = self.search.trim();
        PageQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            sort_by: self.sort_by.clone(),
            sort_direction: self.sort_direction,
            ..PageQuery::new(self.page, self.page_size).with_scope(self.scope)
        }
    }

    /// Replace items and pagination with a server response
    pub fn apply_page(&mut self, page: Page<T>) {
        self.items = page.items;
        self.pagination = Some(page.pagination);
    }

    /// Replace items and pagination with the response to `query`
    pub fn apply_loaded(&mut self, query: PageQuery, page: Page<T>) {
        self.apply_page(page);
        self.loaded = Some(query);
    }

    /// True when the current items already answer `query`
    pub fn is_loaded(&self, query: &PageQuery) -> bool {
        self.loaded.as_ref() == Some(query)
    }

    /// After a delete: move to the page the refresh was made for and show it
    pub fn show_after_delete(&mut self, query: PageQuery, page: Page<T>) {
        self.page = query.page;
        self.apply_loaded(query, page);
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.map_or(1, |p| p.total_pages.max(1))
    }

    pub fn total(&self) -> u64 {
        self.pagination.map_or(0, |p| p.total)
    }

    /// Clamp to `1..=total_pages`. Returns true when the page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let page = page.clamp(1, self.total_pages());
        let changed = page != self.page;
        self.page = page;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Settled search filter; back to page 1
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    /// Header click: same column toggles direction, a new one starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_by.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_by = Some(field.to_string());
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Returns true when the size actually changed (and the page reset)
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    pub fn set_scope(&mut self, scope: Option<Scope>) {
        if self.scope != scope {
            self.scope = scope;
            self.page = 1;
            self.items.clear();
            self.pagination = None;
            self.loaded = None;
        }
    }

    /// Page to show after deleting a row from the current page: one back if
    /// it was the only row on a page beyond the first.
    pub fn page_after_delete(&self) -> u32 {
        if self.items.len() <= 1 && self.page > 1 {
            self.page - 1
        } else {
            self.page
        }
    }

    /// Rows are only draggable when they show the persisted order
    pub fn reorder_enabled(&self) -> bool {
        self.search.trim().is_empty() && self.sort_by.is_none()
    }
}

/// Generation counter for debounced search input.
///
/// Each keystroke takes a ticket; after the debounce delay only the holder
/// of the newest ticket may apply its text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchDebounce {
    generation: u64,
}

impl SearchDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn settle(&self, ticket: u64) -> bool {
        ticket == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Faq;

    fn faq(id: u32) -> Faq {
        Faq {
            id,
            index: id,
            question: format!("Q{}", id),
            answer: String::new(),
        }
    }

    fn state_with(total: u64, page_size: u32) -> ListState<Faq> {
        let mut state = ListState::new(page_size);
        state.apply_page(Page {
            items: (1..=page_size.min(total as u32)).map(faq).collect(),
            pagination: Pagination::new(1, page_size, total),
        });
        state
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = state_with(12, 5);
        assert_eq!(state.total_pages(), 3);

        assert!(state.go_to_page(9));
        assert_eq!(state.page, 3);
        assert!(!state.next_page());
        assert!(state.prev_page());
        assert_eq!(state.page, 2);
        assert!(state.go_to_page(0));
        assert_eq!(state.page, 1);
        assert!(!state.has_prev());
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let mut state = state_with(0, 5);
        assert_eq!(state.total_pages(), 1);
        assert!(!state.next_page());
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = state_with(30, 5);
        state.go_to_page(4);
        state.set_search("massage");
        assert_eq!(state.page, 1);
        assert_eq!(state.query().search.as_deref(), Some("massage"));

        state.set_search("   ");
        assert_eq!(state.query().search, None);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = state_with(30, 5);
        state.go_to_page(3);

        state.toggle_sort("question");
        assert_eq!(state.sort_by.as_deref(), Some("question"));
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert_eq!(state.page, 1);

        state.toggle_sort("question");
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.toggle_sort("answer");
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert!(!state.reorder_enabled());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = state_with(30, 5);
        state.go_to_page(2);
        assert!(!state.set_page_size(5));
        assert_eq!(state.page, 2);
        assert!(state.set_page_size(8));
        assert_eq!(state.page, 1);
        assert_eq!(state.query().page_size, 8);
    }

    #[test]
    fn test_page_after_delete() {
        let mut state = state_with(11, 5);
        state.go_to_page(3);
        state.items = vec![faq(11)];
        assert_eq!(state.page_after_delete(), 2);

        state.go_to_page(1);
        state.items = vec![faq(1)];
        assert_eq!(state.page_after_delete(), 1);
    }

    #[test]
    fn test_scope_change_clears_page() {
        let mut state = state_with(12, 5);
        state.go_to_page(2);
        state.set_scope(Some(Scope { key: "locationId", id: 2 }));
        assert_eq!(state.page, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.query().scope.map(|s| s.id), Some(2));
    }

    #[test]
    fn test_loaded_query_tracks_navigation() {
        let mut state = state_with(12, 5);
        let first = state.query();
        assert!(!state.is_loaded(&first));

        state.apply_loaded(first.clone(), Page {
            items: (1..=5).map(faq).collect(),
            pagination: Pagination::new(1, 5, 12),
        });
        assert!(state.is_loaded(&state.query()));

        state.next_page();
        assert!(!state.is_loaded(&state.query()));
        assert!(state.is_loaded(&first));
    }

    #[test]
    fn test_show_after_delete_needs_no_reload() {
        let mut state = state_with(11, 5);
        state.go_to_page(3);
        let mut query = state.query();
        query.page = 2;

        state.show_after_delete(query, Page {
            items: (6..=10).map(faq).collect(),
            pagination: Pagination::new(2, 5, 10),
        });

        assert_eq!(state.page, 2);
        assert_eq!(state.items.len(), 5);
        assert!(state.is_loaded(&state.query()));
    }

    #[test]
    fn test_debounce_keeps_newest_ticket() {
        let mut debounce = SearchDebounce::new();
        let first = debounce.input();
        let second = debounce.input();
        assert!(!debounce.settle(first));
        assert!(debounce.settle(second));
    }
}
