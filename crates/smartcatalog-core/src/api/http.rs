use crate::api::{BoqTextRequest, CatalogBackend, ProductsEnvelope, SearchQuery};
use crate::config::ClientConfig;
use crate::error::CatalogError;
use crate::model::{BoqLineItem, BoqResult, Product};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Error bodies longer than this are cut before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 2048;

/// Blocking HTTP client for the catalog REST backend.
pub struct HttpBackend {
    config: ClientConfig,
    http: Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        let http = Client::builder()
            .user_agent(concat!("smartcatalog/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn send(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<(u16, Vec<u8>), CatalogError> {
        debug!(method, path, "backend request");
        let resp = request.send()?;
        let status = resp.status().as_u16();
        Ok((status, resp.bytes()?.to_vec()))
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, CatalogError> {
        let (status, body) = self.send(method, path, request)?;
        decode(status, &body)
            .inspect_err(|err| warn!(method, path, status, "backend error: {err}"))
    }

    fn upload(&self, path: &str, file: &Path) -> Result<serde_json::Value, CatalogError> {
        let form = multipart::Form::new().file("file", file)?;
        self.send_json("POST", path, self.http.post(self.url(path)).multipart(form))
    }
}

impl CatalogBackend for HttpBackend {
    fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, CatalogError> {
        let req = self.http.get(self.url("/search")).query(&query.params());
        self.send_json("GET", "/search", req)
    }

    fn product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        let path = format!("/product/{id}");
        let (status, body) = self.send("GET", &path, self.http.get(self.url(&path)))?;
        product_from_response(status, &body)
            .inspect_err(|err| warn!(path = %path, status, "backend error: {err}"))
    }

    fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        let envelope: ProductsEnvelope = self.send_json(
            "GET",
            "/debug/products",
            self.http.get(self.url("/debug/products")),
        )?;
        Ok(envelope.products)
    }

    fn clear_products(&self) -> Result<String, CatalogError> {
        let body: serde_json::Value = self.send_json(
            "DELETE",
            "/debug/products",
            self.http.delete(self.url("/debug/products")),
        )?;
        Ok(message_of(&body))
    }

    fn upload_pdf(&self, path: &Path) -> Result<String, CatalogError> {
        let body = self.upload(self.config.upload_route.path(), path)?;
        Ok(message_of(&body))
    }

    fn import_json(&self, path: &Path) -> Result<String, CatalogError> {
        let body = self.upload("/import-json", path)?;
        Ok(message_of(&body))
    }

    fn process_boq_file(&self, path: &Path) -> Result<Vec<BoqResult>, CatalogError> {
        let body = self.upload("/process-boq", path)?;
        Ok(serde_json::from_value(body)?)
    }

    fn process_boq_text(&self, items: &[BoqLineItem]) -> Result<Vec<BoqResult>, CatalogError> {
        let req = self
            .http
            .post(self.url("/process-boq-text"))
            .json(&BoqTextRequest { items });
        self.send_json("POST", "/process-boq-text", req)
    }

    fn backend_name(&self) -> &str {
        &self.config.api_url
    }
}

/// Decode a response body, or turn a non-success status into an error.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, CatalogError> {
    if !(200..300).contains(&status) {
        return Err(error_from_body(status, body));
    }
    Ok(serde_json::from_slice(body)?)
}

/// A missing product is a 404 or a `null` body; neither is an error.
pub(crate) fn product_from_response(
    status: u16,
    body: &[u8],
) -> Result<Option<Product>, CatalogError> {
    if status == 404 {
        debug!("product not found");
        return Ok(None);
    }
    decode(status, body)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Turn a non-success response into an error, preferring the backend's
/// `detail` message.
pub(crate) fn error_from_body(status: u16, body: &[u8]) -> CatalogError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { detail }) => CatalogError::Backend { status, detail },
        Err(_) => CatalogError::Http {
            status,
            body: String::from_utf8_lossy(body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect(),
        },
    }
}

/// The `message` field of a confirmation body, or the whole body when the
/// backend answered with something else.
pub(crate) fn message_of(body: &serde_json::Value) -> String {
    match body.get("message").and_then(|m| m.as_str()) {
        Some(m) => m.to_string(),
        None => body.to_string(),
    }
}
