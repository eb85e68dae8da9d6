//! # Storage Layer
//!
//! The [`DataStore`] trait is everything the command layer knows about where
//! products and carts live. It mirrors the storefront's REST collaborator:
//! a read-mostly product catalog plus cart and saved-item collections with
//! plain create/update/delete, last write wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON documents in a data directory
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── products.json   # catalog (JSON array of products)
//! ├── cart.json       # cart lines
//! ├── saved.json      # lines saved for later
//! └── config.json     # shop settings
//! ```

use crate::error::Result;
use crate::model::{CartItem, Product, ProductId};
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for catalog and cart storage.
pub trait DataStore {
    /// The whole catalog, in catalog order.
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Get a product by ID
    fn get_product(&self, id: ProductId) -> Result<Product>;

    /// Replace the catalog wholesale
    fn replace_products(&mut self, products: Vec<Product>) -> Result<()>;

    /// Cart lines in the order they were added
    fn list_cart(&self) -> Result<Vec<CartItem>>;

    /// Create or update a cart line
    fn save_cart_item(&mut self, item: &CartItem) -> Result<()>;

    fn delete_cart_item(&mut self, id: &Uuid) -> Result<()>;

    fn list_saved(&self) -> Result<Vec<CartItem>>;

    fn save_saved_item(&mut self, item: &CartItem) -> Result<()>;

    fn delete_saved_item(&mut self, id: &Uuid) -> Result<()>;
}

/// Insert-or-replace by id, keeping the original position of updated lines.
pub(crate) fn upsert(items: &mut Vec<CartItem>, item: &CartItem) {
    match items.iter_mut().find(|it| it.id == item.id) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
}
