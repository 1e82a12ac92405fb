use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a product was found in its source catalog PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReference {
    pub file_path: String,
    /// 1-based page numbers, in backend order.
    #[serde(default, deserialize_with = "lenient_pages")]
    pub page_numbers: Vec<u32>,
}

impl PageReference {
    /// First referenced page, if the reference is navigable at all.
    pub fn first_page(&self) -> Option<u32> {
        self.page_numbers.first().copied()
    }
}

/// A single cell of a product's price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(Decimal),
    Text(String),
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Amount(v) => write!(f, "{v}"),
            PriceValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One extracted catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub type_of_product: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub all_colors: Vec<String>,
    #[serde(default)]
    pub page_reference: Option<PageReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_data: Option<BTreeMap<String, Option<PriceValue>>>,
}

impl Product {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.product_name)
    }

    pub fn brand(&self) -> Option<&str> {
        non_empty(&self.brand_name)
    }

    pub fn designer(&self) -> Option<&str> {
        non_empty(&self.designer)
    }

    pub fn product_type(&self) -> Option<&str> {
        non_empty(&self.type_of_product)
    }

    /// Source PDF path, when the product carries a page reference.
    pub fn source_pdf(&self) -> Option<&str> {
        self.page_reference
            .as_ref()
            .map(|r| r.file_path.as_str())
            .filter(|p| !p.is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// One line of a Bill of Quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoqLineItem {
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub product_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Found,
    NotFound,
}

/// Backend match result for one BOQ line, plus the user's chosen candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqResult {
    pub status: MatchStatus,
    pub boq_item: BoqLineItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub matches: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_match: Option<Product>,
}

/// Accept a missing or `null` JSON array as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A number as extraction output writes it: integer, float or numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LooseNumber {
    fn to_int(&self) -> Option<i64> {
        match self {
            LooseNumber::Int(n) => Some(*n),
            LooseNumber::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            LooseNumber::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Page numbers may arrive as a list or a single value; unreadable entries are dropped.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoosePages {
    Many(Vec<LooseNumber>),
    One(LooseNumber),
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = LooseNumber::deserialize(deserializer)?;
    Ok(value.to_int().and_then(|n| i32::try_from(n).ok()))
}

fn lenient_pages<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let pages = match LoosePages::deserialize(deserializer)? {
        LoosePages::Many(values) => values,
        LoosePages::One(value) => vec![value],
    };
    Ok(pages
        .iter()
        .filter_map(|v| v.to_int().and_then(|n| u32::try_from(n).ok()))
        .collect())
}
