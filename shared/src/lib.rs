//! Shared types for the Padoca storefront
//!
//! Data model and API payload types used by the storefront client.
//! Field names follow the order API's wire format (Portuguese) via
//! serde renames; Rust-side names stay English.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
