pub mod http;

pub use http::HttpBackend;

use crate::error::CatalogError;
use crate::model::{BoqLineItem, BoqResult, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of a `/search` request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        SearchQuery {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Query-string pairs, omitting unset optional parameters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.clone())];
        if let Some(ref c) = self.category {
            params.push(("category", c.clone()));
        }
        if let Some(p) = self.min_price {
            params.push(("min_price", p.to_string()));
        }
        if let Some(p) = self.max_price {
            params.push(("max_price", p.to_string()));
        }
        params
    }
}

/// Body of `GET /debug/products`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Body of `POST /process-boq-text`.
#[derive(Debug, Serialize)]
pub(crate) struct BoqTextRequest<'a> {
    pub items: &'a [BoqLineItem],
}

/// The catalog backend, one method per endpoint.
pub trait CatalogBackend {
    /// `GET /search`: backend-ranked products matching a query.
    fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, CatalogError>;

    /// `GET /product/{id}`. `None` when the backend has no such product.
    fn product(&self, id: i64) -> Result<Option<Product>, CatalogError>;

    /// `GET /debug/products`: the whole catalog.
    fn all_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// `DELETE /debug/products`. Returns the backend's confirmation message.
    fn clear_products(&self) -> Result<String, CatalogError>;

    /// Upload a catalog PDF for extraction.
    fn upload_pdf(&self, path: &Path) -> Result<String, CatalogError>;

    /// `POST /import-json`: import pre-extracted product records.
    fn import_json(&self, path: &Path) -> Result<String, CatalogError>;

    /// `POST /process-boq`: match a BOQ spreadsheet or document.
    fn process_boq_file(&self, path: &Path) -> Result<Vec<BoqResult>, CatalogError>;

    /// `POST /process-boq-text`: match already-parsed BOQ items.
    fn process_boq_text(&self, items: &[BoqLineItem]) -> Result<Vec<BoqResult>, CatalogError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
