use serde::Serialize;
use smartcatalog_core::error::CatalogError;
use smartcatalog_core::notice::Notice;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), Notice> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Notice::from_error(&CatalogError::Json(e), "Failed to render JSON"))?;
    println!("{json}");
    Ok(())
}
