//! Storefront catalog loading
//!
//! The storefront home loads merchant settings and the product list
//! together, and refuses new orders when the merchant is closed.

use crate::{ClientResult, HttpClient};
use shared::models::{MerchantSettings, Product, ProductQuery};

/// Settings + products, loaded in one shot
#[derive(Debug, Clone)]
pub struct Storefront {
    pub settings: MerchantSettings,
    pub products: Vec<Product>,
}

impl Storefront {
    /// Whether the merchant is currently accepting orders
    pub fn is_open(&self) -> bool {
        self.settings.accepting_orders
    }

    /// Message to show when orders are closed
    pub fn closed_message(&self) -> &str {
        &self.settings.closed_message
    }
}

/// Load settings and products concurrently
pub async fn load_storefront(
    client: &HttpClient,
    query: &ProductQuery,
) -> ClientResult<Storefront> {
    let (settings, products) =
        tokio::join!(client.fetch_settings(), client.fetch_products(query));

    Ok(Storefront {
        settings: settings?,
        products: products?,
    })
}
