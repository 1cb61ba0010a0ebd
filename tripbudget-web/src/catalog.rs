//! Fetches the destination catalog served next to the page.
use crate::dom;
use tripbudget_core::{Catalog, CatalogError};

/// Relative URL of the catalog document.
pub const CATALOG_URL: &str = "data.json";

/// Fetch and parse the catalog once. No retry, no cache.
///
/// # Errors
///
/// Returns [`CatalogError::Status`] for a non-OK response, [`CatalogError::Network`]
/// if the request or body read fails, and [`CatalogError::Json`] for a malformed body.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_catalog(url: &str) -> Result<Catalog, CatalogError> {
    let resp = dom::fetch_response(url)
        .await
        .map_err(|err| CatalogError::Network(dom::js_error_message(&err)))?;
    if !resp.ok() {
        return Err(CatalogError::Status(resp.status()));
    }
    let body = dom::response_text(&resp)
        .await
        .map_err(|err| CatalogError::Network(dom::js_error_message(&err)))?;
    let catalog = Catalog::from_json(&body)?;
    log::debug!("catalog loaded with {} destinations", catalog.len());
    Ok(catalog)
}
