use smartcatalog_core::api::{CatalogBackend, HttpBackend, SearchQuery};
use smartcatalog_core::library::{LibraryView, CLEAR_FAILED, LOAD_FAILED, SEARCH_FAILED};
use smartcatalog_core::notice::Notice;
use smartcatalog_core::FilterState;

use super::{announce, failed};
use crate::output;

pub fn search(
    backend: &HttpBackend,
    query: &SearchQuery,
    filters: FilterState,
    output_format: &str,
) -> Result<(), Notice> {
    let mut view = LibraryView::new();
    let notice = view.search(backend, query).map_err(failed(SEARCH_FAILED))?;
    announce(&notice);
    show(&mut view, backend, filters, output_format)
}

pub fn list(backend: &HttpBackend, filters: FilterState, output_format: &str) -> Result<(), Notice> {
    let mut view = LibraryView::new();
    let notice = view.load_all(backend).map_err(failed(LOAD_FAILED))?;
    announce(&notice);
    show(&mut view, backend, filters, output_format)
}

fn show(
    view: &mut LibraryView,
    backend: &HttpBackend,
    filters: FilterState,
    output_format: &str,
) -> Result<(), Notice> {
    let filtered = !filters.is_empty();
    view.apply(filters);
    let visible = view.visible();

    if filtered {
        announce(&Notice::info(
            "Filters",
            format!(
                "{} of {} product(s) match the filters",
                visible.len(),
                view.snapshot().len()
            ),
        ));
    }

    match output_format {
        "json" => output::json::print(&visible),
        _ => {
            output::table::print_products(&visible, &backend.config().storage_url);
            Ok(())
        }
    }
}

pub fn facets(backend: &HttpBackend, output_format: &str) -> Result<(), Notice> {
    let mut view = LibraryView::new();
    view.load_all(backend).map_err(failed(LOAD_FAILED))?;

    match output_format {
        "json" => output::json::print(view.facet_options()),
        _ => {
            output::table::print_facets(view.facet_options());
            Ok(())
        }
    }
}

pub fn product(backend: &HttpBackend, id: i64, output_format: &str) -> Result<(), Notice> {
    let product = backend
        .product(id)
        .map_err(failed(LOAD_FAILED))?
        .ok_or_else(|| Notice::info("No results", format!("No product with id {id}")))?;

    match output_format {
        "json" => output::json::print(&product),
        _ => {
            output::table::print_product(&product, &backend.config().storage_url);
            Ok(())
        }
    }
}

pub fn clear(backend: &HttpBackend, confirmed: bool) -> Result<(), Notice> {
    if !confirmed {
        return Err(Notice::info(
            "Not cleared",
            "this deletes every product in the catalog; re-run with --yes to confirm",
        ));
    }
    let mut view = LibraryView::new();
    let notice = view.clear_catalog(backend).map_err(failed(CLEAR_FAILED))?;
    announce(&notice);
    Ok(())
}
