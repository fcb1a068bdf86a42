//! # Admin List State
//!
//! Search box and column sort of the admin property table.

use std::sync::{Arc, Mutex};

use dwellnest_core::admin::admin_query;
use dwellnest_core::{AdminSort, AdminSortField, Property};

use super::CatalogState;

#[derive(Debug, Default)]
struct AdminView {
    search: String,
    sort: AdminSort,
}

/// Admin table state. Starts with an empty search, sorted by id ascending.
#[derive(Debug, Clone, Default)]
pub struct AdminListState {
    inner: Arc<Mutex<AdminView>>,
}

impl AdminListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> String {
        self.inner.lock().expect("Admin mutex poisoned").search.clone()
    }

    pub fn sort(&self) -> AdminSort {
        self.inner.lock().expect("Admin mutex poisoned").sort
    }

    /// Sets the search term. Callers pass an already validated term.
    pub fn set_search(&self, term: String) {
        self.inner.lock().expect("Admin mutex poisoned").search = term;
    }

    /// Column-header click; returns the resulting sort.
    pub fn toggle_sort(&self, field: AdminSortField) -> AdminSort {
        let mut view = self.inner.lock().expect("Admin mutex poisoned");
        view.sort.toggle(field);
        view.sort
    }

    /// Runs `f` over the filtered and sorted table rows.
    pub fn with_results<F, R>(&self, catalog: &CatalogState, f: F) -> R
    where
        F: FnOnce(&str, AdminSort, &[&Property]) -> R,
    {
        let snapshot = catalog.snapshot();
        let view = self.inner.lock().expect("Admin mutex poisoned");
        let rows = admin_query(snapshot.catalog.as_slice(), &view.search, view.sort);
        f(&view.search, view.sort, &rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
