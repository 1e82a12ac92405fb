use smartcatalog_core::api::HttpBackend;
use smartcatalog_core::notice::Notice;
use smartcatalog_core::{IMPORT_FAILED, UPLOAD_FAILED};
use std::path::Path;

use super::{announce, failed};

pub fn pdf(backend: &HttpBackend, pdf_file: &Path) -> Result<(), Notice> {
    eprintln!("Uploading {} ...", pdf_file.display());
    let message =
        smartcatalog_core::upload_catalog(backend, pdf_file).map_err(failed(UPLOAD_FAILED))?;
    announce(&Notice::success(message));
    Ok(())
}

pub fn json(backend: &HttpBackend, json_file: &Path) -> Result<(), Notice> {
    let message =
        smartcatalog_core::import_products(backend, json_file).map_err(failed(IMPORT_FAILED))?;
    announce(&Notice::success(message));
    Ok(())
}
