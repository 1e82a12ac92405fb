use crate::model::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One filterable dimension of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Brand,
    Designer,
    Type,
    Color,
    Pdf,
}

impl Facet {
    pub const ALL: [Facet; 5] = [
        Facet::Brand,
        Facet::Designer,
        Facet::Type,
        Facet::Color,
        Facet::Pdf,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Facet::Brand => "Brand",
            Facet::Designer => "Designer",
            Facet::Type => "Product Type",
            Facet::Color => "Color",
            Facet::Pdf => "PDF Source",
        }
    }

    /// How a facet value is shown to the user. PDF paths collapse to their
    /// file name.
    pub fn display_value(self, value: &str) -> &str {
        match self {
            Facet::Pdf => value
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(value),
            _ => value,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Distinct, sorted values available for each facet in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub brand_names: Vec<String>,
    pub designers: Vec<String>,
    pub types: Vec<String>,
    pub colors: Vec<String>,
    pub pdfs: Vec<String>,
}

impl FacetOptions {
    pub fn for_facet(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Brand => &self.brand_names,
            Facet::Designer => &self.designers,
            Facet::Type => &self.types,
            Facet::Color => &self.colors,
            Facet::Pdf => &self.pdfs,
        }
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&f| self.for_facet(f).is_empty())
    }
}

/// Collect the distinct non-empty values of every facet across `snapshot`,
/// each sorted ascending.
pub fn derive_facet_options(snapshot: &[Product]) -> FacetOptions {
    FacetOptions {
        brand_names: distinct(snapshot.iter().filter_map(|p| p.brand())),
        designers: distinct(snapshot.iter().filter_map(|p| p.designer())),
        types: distinct(snapshot.iter().filter_map(|p| p.product_type())),
        colors: distinct(
            snapshot
                .iter()
                .flat_map(|p| p.all_colors.iter().map(String::as_str)),
        ),
        pdfs: distinct(snapshot.iter().filter_map(|p| p.source_pdf())),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
