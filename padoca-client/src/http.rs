//! HTTP client for the order API
//!
//! Thin wrapper over `reqwest` with the storefront's endpoint set. All
//! failures map into [`ClientError`]; no call leaves partial client-side
//! state behind.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    CreateOrderResponse, MerchantSettings, Order, OrderCreate, Product, ProductQuery,
};

/// HTTP client for making network requests to the order API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request without body, returning the raw response text
    async fn patch_empty(&self, path: &str) -> ClientResult<String> {
        let response = self.client.patch(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }
        Ok(response.text().await?)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    /// Map a non-2xx status to a client error, extracting the server's
    /// `{"error": "..."}` message when the body carries one
    fn status_error(status: StatusCode, body: String) -> ClientError {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        }
    }

    // ========== Settings API ==========

    /// Fetch the merchant settings snapshot
    pub async fn fetch_settings(&self) -> ClientResult<MerchantSettings> {
        self.get("/settings", &[]).await
    }

    // ========== Products API ==========

    /// Fetch products, optionally filtered by category/availability
    pub async fn fetch_products(&self, query: &ProductQuery) -> ClientResult<Vec<Product>> {
        self.get("/products", &query.to_query()).await
    }

    /// Fetch a single product by id
    pub async fn fetch_product(&self, id: &str) -> ClientResult<Product> {
        self.get(&format!("/products/{}", id), &[]).await
    }

    // ========== Orders API ==========

    /// Create an order, returning the server-assigned order
    pub async fn create_order(&self, payload: &OrderCreate) -> ClientResult<Order> {
        let response: CreateOrderResponse = self.post("/orders", payload).await?;
        Ok(response.order)
    }

    /// Fetch an order by its human-facing number
    pub async fn fetch_order_by_number(&self, number: &str) -> ClientResult<Order> {
        self.get(&format!("/orders/numero/{}", number), &[]).await
    }

    /// Report customer-side PIX payment completion for an order
    ///
    /// The server may answer with the updated order or an empty body; in
    /// the latter case callers re-fetch to observe the flipped flag.
    pub async fn confirm_pix_payment(&self, order_id: &str) -> ClientResult<Option<Order>> {
        let body = self
            .patch_empty(&format!("/orders/{}/confirmar-pix-cliente", order_id))
            .await?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Order>(&body) {
            Ok(order) => Ok(Some(order)),
            Err(e) => {
                tracing::warn!(error = %e, "PIX confirmation response not an order, ignoring body");
                Ok(None)
            }
        }
    }
}
