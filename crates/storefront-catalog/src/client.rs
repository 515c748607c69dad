//! # Catalog Client
//!
//! The remote product CRUD service, behind the [`CatalogClient`] trait.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog REST Contract                                │
//! │                                                                         │
//! │  list_products()        GET    /products        → [Product]            │
//! │  get_product(id)        GET    /products/{id}   → Product | NotFound   │
//! │  create_product(draft)  POST   /products        → Product (echo)       │
//! │  update_product(id, d)  PUT    /products/{id}   → Product (echo)       │
//! │  delete_product(id)     DELETE /products/{id}   → ()                   │
//! │                                                                         │
//! │  The demo service does NOT persist writes: a created product cannot    │
//! │  be fetched afterwards, and deletes do not remove anything.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Found
//! The service answers an unknown id either with `404` or with `200` and an
//! empty (or `null`) body. Both become [`CatalogError::NotFound`].
//!
//! No call is retried.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use storefront_core::{Product, ProductDraft, ProductId};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Trait
// =============================================================================

/// Product CRUD operations offered by the catalog service.
#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Retrieves every product in the catalog.
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Retrieves a single product.
    async fn get_product(&self, id: ProductId) -> CatalogResult<Product>;

    /// Creates a product; returns the service's echo of it.
    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product>;

    /// Replaces a product; returns the service's echo of it.
    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`CatalogClient`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    base_url: Url,
    http: reqwest::Client,
}

/// Minimal shape of a write echo, used when the echo is not a full product.
#[derive(Debug, Deserialize)]
struct EchoId {
    id: ProductId,
}

impl HttpCatalogClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::from_parts(base_url, http))
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn from_parts(base_url: Url, http: reqwest::Client) -> Self {
        HttpCatalogClient { base_url, http }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn products_url(&self) -> CatalogResult<Url> {
        Ok(self.base_url.join("products")?)
    }

    fn product_url(&self, id: ProductId) -> CatalogResult<Url> {
        Ok(self.base_url.join(&format!("products/{}", id))?)
    }

    /// Reads the body of a successful response, turning a failed status into
    /// an error. `404` becomes `NotFound` when `id` is given.
    async fn read_body(response: Response, id: Option<ProductId>) -> CatalogResult<String> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(CatalogError::NotFound(id));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Catalog service returned an error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    /// Decodes the echo of a create or update.
    ///
    /// A full product is taken as is. An echo carrying only an id is completed
    /// from the draft that was sent.
    fn decode_echo(body: &str, draft: ProductDraft) -> CatalogResult<Product> {
        if let Ok(product) = serde_json::from_str::<Product>(body) {
            return Ok(product);
        }

        let echo: EchoId = serde_json::from_str(body)?;
        Ok(draft.into_product(echo.id))
    }
}

fn is_empty_body(body: &str) -> bool {
    let body = body.trim();
    body.is_empty() || body == "null"
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let start = Instant::now();
        let url = self.products_url()?;
        debug!(%url, "list_products");

        let response = self.http.get(url).send().await?;
        let body = Self::read_body(response, None).await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            count = products.len(),
            "list_products complete"
        );
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Product> {
        let start = Instant::now();
        let url = self.product_url(id)?;
        debug!(%url, "get_product");

        let response = self.http.get(url).send().await?;
        let body = Self::read_body(response, Some(id)).await?;

        if is_empty_body(&body) {
            debug!(%id, "Empty body for product, treating as not found");
            return Err(CatalogError::NotFound(id));
        }

        let product: Product = serde_json::from_str(&body)?;
        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            %id,
            "get_product complete"
        );
        Ok(product)
    }

    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let start = Instant::now();
        let url = self.products_url()?;
        debug!(%url, title = %draft.title, "create_product");

        let response = self.http.post(url).json(&draft).send().await?;
        let body = Self::read_body(response, None).await?;
        let created = Self::decode_echo(&body, draft)?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            id = %created.id,
            "create_product complete (not persisted by the service)"
        );
        Ok(created)
    }

    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product> {
        let start = Instant::now();
        let url = self.product_url(id)?;
        debug!(%url, "update_product");

        let response = self.http.put(url).json(&draft).send().await?;
        let body = Self::read_body(response, Some(id)).await?;

        if is_empty_body(&body) {
            debug!(%id, "Empty update echo, treating as not found");
            return Err(CatalogError::NotFound(id));
        }

        let updated = Self::decode_echo(&body, draft)?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            %id,
            "update_product complete (not persisted by the service)"
        );
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        let start = Instant::now();
        let url = self.product_url(id)?;
        debug!(%url, "delete_product");

        let response = self.http.delete(url).send().await?;
        Self::read_body(response, Some(id)).await?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            %id,
            "delete_product complete (not persisted by the service)"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
