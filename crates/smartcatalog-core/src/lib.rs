pub mod api;
pub mod boq;
pub mod config;
pub mod error;
pub mod filter;
pub mod library;
pub mod links;
pub mod model;
pub mod notice;
pub mod snapshot;

use api::CatalogBackend;
use error::CatalogError;
use std::path::Path;
use tracing::info;

pub use boq::{parse_boq_text, select_match, BoqSession, DefaultSelection};
pub use filter::{apply_filters, derive_facet_options, Facet, FacetOptions, FilterState};

pub const UPLOAD_FAILED: &str = "Failed to upload file";
pub const IMPORT_FAILED: &str = "Failed to import JSON";

/// Upload a catalog PDF for extraction.
///
/// Files without a `.pdf` extension are rejected before contacting the
/// backend.
pub fn upload_catalog(backend: &dyn CatalogBackend, path: &Path) -> Result<String, CatalogError> {
    ensure_extension(path, "pdf")?;
    let message = backend.upload_pdf(path)?;
    info!(file = %path.display(), "catalog uploaded: {message}");
    Ok(message)
}

/// Import pre-extracted products from a JSON file.
pub fn import_products(backend: &dyn CatalogBackend, path: &Path) -> Result<String, CatalogError> {
    ensure_extension(path, "json")?;
    let message = backend.import_json(path)?;
    info!(file = %path.display(), "products imported: {message}");
    Ok(message)
}

fn ensure_extension(path: &Path, expected: &'static str) -> Result<(), CatalogError> {
    let ok = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(expected))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(CatalogError::UnsupportedFile {
            path: path.to_path_buf(),
            expected,
        })
    }
}
