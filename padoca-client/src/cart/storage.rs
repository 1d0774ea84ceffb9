//! Durable cart snapshot
//!
//! The cart is persisted as a JSON array of items under a fixed file
//! name so it survives restarts. Restoration fails soft: a missing or
//! malformed snapshot yields an empty cart, never an error.

use super::CartItem;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot file name, fixed per storage directory
const SNAPSHOT_FILE: &str = "cart.json";

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cart snapshot storage
#[derive(Debug, Clone)]
pub struct CartStorage {
    /// Snapshot path: {dir}/cart.json
    file_path: PathBuf,
}

impl CartStorage {
    /// Create storage rooted at the given directory
    pub fn new(dir: &Path) -> Self {
        Self {
            file_path: dir.join(SNAPSHOT_FILE),
        }
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Restore the persisted cart
    ///
    /// Missing, unreadable, or unparseable snapshots are treated as an
    /// empty cart; corrupt data must never propagate to the customer.
    pub fn load(&self) -> Vec<CartItem> {
        if !self.file_path.exists() {
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.file_path.display(), error = %e, "Failed to read cart snapshot, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.file_path.display(), error = %e, "Malformed cart snapshot, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full cart snapshot
    pub fn save(&self, items: &[CartItem]) -> Result<(), CartStorageError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.file_path, content)?;

        tracing::debug!(path = %self.file_path.display(), items = items.len(), "Cart snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Category, Product};

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {}", id),
            description: String::new(),
            price,
            category: Category::Paes,
            image_url: String::new(),
            available: true,
            featured: false,
            sort_order: 0,
        }
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = CartStorage::new(dir.path());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = CartStorage::new(dir.path());

        let items = vec![
            CartItem {
                product: product("p1", 5.0),
                quantity: 2,
            },
            CartItem {
                product: product("p2", 3.5),
                quantity: 1,
            },
        ];

        storage.save(&items).unwrap();
        assert_eq!(storage.load(), items);
    }

    #[test]
    fn test_malformed_snapshot_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = CartStorage::new(dir.path());

        std::fs::write(storage.path(), "{not valid json").unwrap();
        assert!(storage.load().is_empty());
    }
}
