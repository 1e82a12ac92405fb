use crate::filter::{derive_facet_options, FacetOptions};
use crate::model::Product;

/// The full, unfiltered product set most recently fetched from the backend.
///
/// Facet options are derived on every replacement so they can never go
/// stale relative to the products they describe.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    options: FacetOptions,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        let options = derive_facet_options(&products);
        CatalogSnapshot { products, options }
    }

    /// Replace the held products wholesale.
    pub fn replace(&mut self, products: Vec<Product>) {
        tracing::info!(count = products.len(), "catalog snapshot replaced");
        *self = CatalogSnapshot::new(products);
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn facet_options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
