pub mod boq;
pub mod library;
pub mod upload;

use smartcatalog_core::error::CatalogError;
use smartcatalog_core::notice::Notice;

/// Map a failed action to the notice shown to the user.
pub fn failed(fallback: &'static str) -> impl FnOnce(CatalogError) -> Notice {
    move |e| Notice::from_error(&e, fallback)
}

/// Notices go to stderr so stdout stays machine-readable.
pub fn announce(notice: &Notice) {
    eprintln!("{notice}");
}
