//! In-memory list screen: search, facet filters, pagination, and selection.
//!
//! The full collection is fetched once; the visible subset is recomputed by a
//! linear scan whenever it is asked for. Mutations are reconciled locally only
//! after the backend acknowledged them.

use std::collections::{BTreeMap, BTreeSet};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// An entity that can be shown on a list screen.
pub trait Listable {
    /// Stable identifier used for selection and reconciliation.
    fn id(&self) -> &str;

    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a categorical facet such as `status` or `type`.
    fn facet(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Set of selected ids with toggle semantics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}

/// State of one admin list screen.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    query: String,
    filters: BTreeMap<String, String>,
    page: usize,
    page_size: usize,
    selection: Selection,
}

impl<T: Listable> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            query: String::new(),
            filters: BTreeMap::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            selection: Selection::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search string. Resets to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 0;
    }

    /// Set a facet filter; an empty value or `all` clears it.
    pub fn set_filter(&mut self, facet: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            self.filters.remove(facet);
        } else {
            self.filters.insert(facet.to_string(), value.to_lowercase());
        }
        self.page = 0;
    }

    fn matches(&self, item: &T, needle: &str) -> bool {
        let text_ok = needle.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
        text_ok
            && self.filters.iter().all(|(facet, wanted)| {
                item.facet(facet)
                    .map(|v| v.to_lowercase() == *wanted)
                    .unwrap_or(false)
            })
    }

    /// Items matching the current query and filters, in original order.
    ///
    /// The query is matched as typed, surrounding whitespace included; only
    /// the empty string disables the text filter.
    pub fn visible(&self) -> Vec<&T> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| self.matches(item, &needle))
            .collect()
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Jump to a zero-based page, clamped to the last one.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.visible().len().div_ceil(self.page_size)
    }

    pub fn page_items(&self) -> Vec<&T> {
        self.visible()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.selection.toggle(id);
        }
    }

    /// Select every visible item, or clear the selection if all of them
    /// already are.
    pub fn toggle_all(&mut self) {
        let visible: Vec<String> = self
            .visible()
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        let all_selected =
            !visible.is_empty() && visible.iter().all(|id| self.selection.contains(id));
        if all_selected {
            self.selection.clear();
        } else {
            for id in visible {
                if !self.selection.contains(&id) {
                    self.selection.toggle(&id);
                }
            }
        }
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids()
    }

    /// Replace the whole snapshot, dropping selections that no longer exist.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        let ids: BTreeSet<String> = self.items.iter().map(|i| i.id().to_string()).collect();
        self.selection.retain(|id| ids.contains(id));
        self.set_page(self.page);
    }

    /// Drop acknowledged deletions from the snapshot and the selection.
    pub fn remove(&mut self, ids: &[String]) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !ids.iter().any(|id| id == item.id()));
        self.selection.retain(|id| !ids.iter().any(|gone| gone == id));
        self.set_page(self.page);
        before - self.items.len()
    }

    /// Apply an acknowledged change to the matching items.
    pub fn patch(&mut self, ids: &[String], mut f: impl FnMut(&mut T)) -> usize {
        let mut touched = 0;
        for item in self
            .items
            .iter_mut()
            .filter(|item| ids.iter().any(|id| id == item.id()))
        {
            f(item);
            touched += 1;
        }
        touched
    }
}
