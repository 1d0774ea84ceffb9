//! Data models
//!
//! Mirrors the order API's JSON shapes. All IDs are opaque `String`s
//! assigned by the server.

pub mod order;
pub mod product;
pub mod settings;

// Re-exports
pub use order::*;
pub use product::*;
pub use settings::*;
