use crate::api::{CatalogBackend, SearchQuery};
use crate::error::CatalogError;
use crate::filter::{apply_filters, FacetOptions, FilterState};
use crate::model::Product;
use crate::notice::Notice;
use crate::snapshot::CatalogSnapshot;
use tracing::warn;

pub const LOAD_FAILED: &str = "Failed to load products";
pub const SEARCH_FAILED: &str = "Failed to search products";
pub const CLEAR_FAILED: &str = "Failed to clear catalog";

/// The product library page: a snapshot, the user's filters, and the
/// fetch flows that replace the snapshot.
///
/// Successful flows report a [`Notice`]. Failures leave the snapshot and
/// filters exactly as they were; callers turn the error into a notice with
/// [`Notice::from_error`] and the matching `*_FAILED` message.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    snapshot: CatalogSnapshot,
    filters: FilterState,
}

impl LibraryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn facet_options(&self) -> &FacetOptions {
        self.snapshot.facet_options()
    }

    /// Replace the snapshot directly, e.g. with products already in hand.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.snapshot.replace(products);
    }

    /// Store a new filter state. Filtering itself happens in [`visible`].
    ///
    /// [`visible`]: LibraryView::visible
    pub fn apply(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Products in the snapshot that pass the current filters.
    pub fn visible(&self) -> Vec<Product> {
        apply_filters(self.snapshot.products(), &self.filters)
    }

    /// Load the whole catalog.
    pub fn load_all(&mut self, backend: &dyn CatalogBackend) -> Result<Notice, CatalogError> {
        let products = backend.all_products().inspect_err(|e| {
            warn!("loading catalog failed: {e}");
        })?;
        let count = products.len();
        self.snapshot.replace(products);
        Ok(Notice::info("Catalog", format!("Loaded {count} product(s)")))
    }

    pub fn search(
        &mut self,
        backend: &dyn CatalogBackend,
        query: &SearchQuery,
    ) -> Result<Notice, CatalogError> {
        let products = backend.search(query).inspect_err(|e| {
            warn!(query = %query.query, "search failed: {e}");
        })?;
        let count = products.len();
        self.snapshot.replace(products);
        if count == 0 {
            Ok(Notice::info(
                "No results",
                "No products found matching your search",
            ))
        } else {
            Ok(Notice::info("Search", format!("Found {count} product(s)")))
        }
    }

    /// Delete every product on the backend. The snapshot empties only if
    /// the backend confirms.
    pub fn clear_catalog(&mut self, backend: &dyn CatalogBackend) -> Result<Notice, CatalogError> {
        backend.clear_products().inspect_err(|e| {
            warn!("clearing catalog failed: {e}");
        })?;
        self.snapshot.clear();
        Ok(Notice::success("Catalog cleared successfully"))
    }
}
