pub mod facets;

pub use facets::{derive_facet_options, Facet, FacetOptions};

use crate::model::Product;
use serde::{Deserialize, Serialize};

/// Facet values the user has chosen to include.
///
/// Each list is ordered and duplicate-free. An empty list places no
/// constraint on its facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub brand_names: Vec<String>,
    #[serde(default)]
    pub designers: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub pdfs: Vec<String>,
}

impl FilterState {
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Brand => &self.brand_names,
            Facet::Designer => &self.designers,
            Facet::Type => &self.types,
            Facet::Color => &self.colors,
            Facet::Pdf => &self.pdfs,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Brand => &mut self.brand_names,
            Facet::Designer => &mut self.designers,
            Facet::Type => &mut self.types,
            Facet::Color => &mut self.colors,
            Facet::Pdf => &mut self.pdfs,
        }
    }

    /// Add a value to a facet's selection. Already-selected values are ignored.
    pub fn select(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        let values = self.values_mut(facet);
        if !values.contains(&value) {
            values.push(value);
        }
    }

    pub fn deselect(&mut self, facet: Facet, value: &str) {
        self.values_mut(facet).retain(|v| v != value);
    }

    /// Builder-style [`FilterState::select`] for several values at once.
    pub fn with<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for v in values {
            self.select(facet, v);
        }
        self
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&f| self.values(f).is_empty())
    }
}

/// Return the products matching every non-empty facet of `state`, in
/// snapshot order.
///
/// Facets combine with AND; values within a facet combine with OR.
pub fn apply_filters(snapshot: &[Product], state: &FilterState) -> Vec<Product> {
    snapshot
        .iter()
        .filter(|p| matches(p, state))
        .cloned()
        .collect()
}

/// Whether a single product passes every facet of `state`.
pub fn matches(product: &Product, state: &FilterState) -> bool {
    Facet::ALL
        .iter()
        .all(|&facet| facet_matches(product, facet, state.values(facet)))
}

fn facet_matches(product: &Product, facet: Facet, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let contains = |value: Option<&str>| value.is_some_and(|v| selected.iter().any(|s| s == v));
    match facet {
        Facet::Brand => contains(product.brand_name.as_deref()),
        Facet::Designer => contains(product.designer.as_deref()),
        Facet::Type => contains(product.type_of_product.as_deref()),
        Facet::Color => product
            .all_colors
            .iter()
            .any(|c| selected.iter().any(|s| s == c)),
        Facet::Pdf => contains(
            product
                .page_reference
                .as_ref()
                .map(|r| r.file_path.as_str()),
        ),
    }
}
