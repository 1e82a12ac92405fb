pub mod session;

pub use session::{BoqSession, BoqState, FailReason};

use crate::error::CatalogError;
use crate::model::{BoqLineItem, BoqResult, MatchStatus};
use serde::Serialize;
use std::path::Path;

pub const PROCESS_FAILED: &str = "Failed to process BOQ";

/// Parse free text, one `name, brand, type` item per line, into BOQ items.
///
/// Blank lines are skipped. Any line that does not split into exactly three
/// non-empty fields fails the whole parse, so nothing is submitted partially.
pub fn parse_boq_text(text: &str) -> Result<Vec<BoqLineItem>, CatalogError> {
    let mut items = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let item = parse_line(line).ok_or_else(|| CatalogError::MalformedLine {
            line: idx + 1,
            content: line.to_string(),
        })?;
        items.push(item);
    }

    if items.is_empty() {
        return Err(CatalogError::EmptyBoq);
    }
    Ok(items)
}

fn parse_line(line: &str) -> Option<BoqLineItem> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [name, brand, product_type]
            if !name.is_empty() && !brand.is_empty() && !product_type.is_empty() =>
        {
            Some(BoqLineItem {
                name: name.to_string(),
                brand: brand.to_string(),
                product_type: product_type.to_string(),
            })
        }
        _ => None,
    }
}

/// Read a text file and parse it with [`parse_boq_text`].
pub fn parse_boq_file(path: &Path) -> Result<Vec<BoqLineItem>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    parse_boq_text(&text)
}

/// Return a copy of `results` where item `index` selects candidate `match_id`.
///
/// An unknown index or a candidate id absent from that item's matches leaves
/// the results unchanged, including any earlier selection.
pub fn select_match(results: &[BoqResult], index: usize, match_id: i64) -> Vec<BoqResult> {
    let mut next = results.to_vec();
    let Some(result) = next.get_mut(index) else {
        tracing::debug!(index, "select_match: index out of range");
        return next;
    };
    match result.matches.iter().find(|m| m.id == match_id) {
        Some(candidate) => result.selected_match = Some(candidate.clone()),
        None => tracing::debug!(index, match_id, "select_match: candidate not in matches"),
    }
    next
}

/// What to select for a line item when its results first arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefaultSelection {
    /// Keep the backend's selection when it is one of the item's candidates.
    #[default]
    Unset,
    /// Select the first candidate for any item that has none selected.
    FirstCandidate,
}

/// Prepare freshly received results for display.
///
/// A selection that is not one of the item's candidates is dropped first,
/// then `policy` fills in the remaining gaps.
pub fn apply_default_selection(
    mut results: Vec<BoqResult>,
    policy: DefaultSelection,
) -> Vec<BoqResult> {
    for r in results.iter_mut() {
        let stray = r
            .selected_match
            .as_ref()
            .is_some_and(|s| !r.matches.iter().any(|m| m.id == s.id));
        if stray {
            tracing::debug!(item = %r.boq_item.name, "dropping selection outside candidates");
            r.selected_match = None;
        }
    }
    if policy == DefaultSelection::FirstCandidate {
        for r in results.iter_mut().filter(|r| r.selected_match.is_none()) {
            r.selected_match = r.matches.first().cloned();
        }
    }
    results
}

/// Counts over a results sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoqSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub selected: usize,
}

impl BoqSummary {
    pub fn of(results: &[BoqResult]) -> Self {
        let found = results
            .iter()
            .filter(|r| r.status == MatchStatus::Found)
            .count();
        BoqSummary {
            total: results.len(),
            found,
            not_found: results.len() - found,
            selected: results.iter().filter(|r| r.selected_match.is_some()).count(),
        }
    }

    pub fn all_found(&self) -> bool {
        self.not_found == 0
    }
}
