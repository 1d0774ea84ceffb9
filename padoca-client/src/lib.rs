//! Padoca Client - storefront client for the bakery order API
//!
//! Provides the customer-facing ordering flow: product catalog, a cart
//! with a durable snapshot and derived pricing, checkout submission,
//! and order-status tracking with customer-side PIX confirmation.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod money;
pub mod tracking;

pub use cart::{CartError, CartItem, CartStorage, CartStore, CartTotals};
pub use catalog::{Storefront, load_storefront};
pub use checkout::{CheckoutForm, CheckoutOutcome, PickupOption, submit_order};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use tracking::{DEFAULT_POLL_INTERVAL, OrderTracker, TrackingState};

// Re-export shared types for convenience
pub use shared::models::{
    Category, MerchantSettings, Order, OrderStatus, PaymentMethod, PaymentStatus, Product,
    ProductQuery,
};
