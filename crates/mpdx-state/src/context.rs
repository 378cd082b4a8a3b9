//! Per-page filter context.

use mpdx_model::{
    ActiveFilterSet, CoercionOptions, FieldTable, FilterConfig, FilterDocument, FilterValue,
    PageKind, SavedFilter,
};
use mpdx_normalization::{deserialize_saved_filter, deserialize_with};
use tracing::{debug, info, warn};

use crate::observer::{ChangeCause, FilterChange, FilterObserver};
use crate::query::{ListQueryTracker, QueryTicket};
use crate::selection::MassSelection;
use crate::store::ActiveFilterStore;
use crate::url::UrlSynchronizer;

/// Filter state of one list page.
///
/// Owns the store and every consumer derived from it. Each change is
/// committed to the URL, supersedes in-flight list queries, resets the
/// row selection, and reaches every observer before the call returns.
pub struct PageFilterContext {
    page: PageKind,
    table: FieldTable,
    coercion: CoercionOptions,
    store: ActiveFilterStore,
    url: UrlSynchronizer,
    queries: ListQueryTracker,
    selection: MassSelection,
    observers: Vec<Box<dyn FilterObserver>>,
}

impl PageFilterContext {
    pub fn new(page: PageKind, config: &FilterConfig) -> Self {
        let table = FieldTable::for_page(page);
        Self {
            page,
            table,
            coercion: config.coercion.clone(),
            store: ActiveFilterStore::new(),
            url: UrlSynchronizer::new(table, config),
            queries: ListQueryTracker::new(),
            selection: MassSelection::new(),
            observers: Vec::new(),
        }
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn table(&self) -> FieldTable {
        self.table
    }

    pub fn filters(&self) -> &ActiveFilterSet {
        self.store.get()
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Current page query string.
    pub fn query(&self) -> &str {
        self.url.query()
    }

    pub fn selection(&self) -> &MassSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut MassSelection {
        &mut self.selection
    }

    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Initial page load: the filters come from the URL.
    pub fn load(&mut self, query: &str) -> bool {
        let filters = self.url.load(query);
        info!(page = %self.page, active = filters.len(), "loaded filters from URL");
        self.replace(filters, ChangeCause::Load, false)
    }

    /// Back/forward navigation: the filters are re-derived from the URL,
    /// whatever was active in memory.
    pub fn navigate(&mut self, query: &str) -> bool {
        let filters = self.url.load(query);
        self.replace(filters, ChangeCause::Navigate, false)
    }

    /// Sets or removes one field by its camelCase key.
    ///
    /// Keys unknown to this page are ignored.
    pub fn set_field(&mut self, key: &str, value: Option<FilterValue>) -> bool {
        let Some(field) = self.table.key(key) else {
            debug!(key, page = %self.page, "ignoring unknown filter key");
            return false;
        };
        let changed = self.store.set_field(field, value);
        if changed {
            self.commit(ChangeCause::Field(field), true);
        }
        changed
    }

    pub fn clear_all(&mut self) -> bool {
        let changed = self.store.clear_all();
        if changed {
            self.commit(ChangeCause::Cleared, true);
        }
        changed
    }

    /// Replaces the active filters with a saved filter of this page.
    pub fn apply_saved_filter(&mut self, saved: &SavedFilter) -> bool {
        if saved.page != self.page {
            warn!(
                name = %saved.name,
                saved_page = %saved.page,
                page = %self.page,
                "saved filter belongs to another page"
            );
            return false;
        }
        let filters = deserialize_saved_filter(saved, &self.coercion);
        info!(name = %saved.name, active = filters.len(), "applying saved filter");
        self.replace(filters, ChangeCause::Replaced, true)
    }

    /// Replaces the active filters with a persisted document.
    pub fn apply_document(&mut self, doc: &FilterDocument) -> bool {
        let filters = deserialize_with(doc, self.table, &self.coercion);
        self.replace(filters, ChangeCause::Replaced, true)
    }

    /// Issues a ticket for a list query over the current filters.
    pub fn begin_list_query(&mut self) -> QueryTicket {
        self.queries.begin(self.store.version(), self.store.get())
    }

    /// Whether the results of `ticket` are still wanted.
    pub fn accept_results(&self, ticket: &QueryTicket) -> bool {
        self.queries.accept(ticket)
    }

    fn replace(&mut self, filters: ActiveFilterSet, cause: ChangeCause, write_url: bool) -> bool {
        let changed = self.store.replace_all(filters);
        if changed {
            self.commit(cause, write_url);
        }
        changed
    }

    fn commit(&mut self, cause: ChangeCause, write_url: bool) {
        if write_url {
            self.url.sync(self.store.get());
        }
        let version = self.store.version();
        self.queries.invalidate(version);
        self.selection.deselect_all();

        let change = FilterChange {
            filters: self.store.get(),
            version,
            cause,
            query: self.url.query(),
        };
        for observer in &mut self.observers {
            observer.filters_changed(&change);
        }
    }
}

impl std::fmt::Debug for PageFilterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFilterContext")
            .field("page", &self.page)
            .field("filters", self.store.get())
            .field("version", &self.store.version())
            .field("query", &self.url.query())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
