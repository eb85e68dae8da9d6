use super::{DataStore, upsert};
use crate::error::{Result, ShopError};
use crate::model::{CartItem, Product, ProductId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const PRODUCTS_FILE: &str = "products.json";
pub const CART_FILE: &str = "cart.json";
pub const SAVED_FILE: &str = "saved.json";

/// JSON-document storage rooted at a data directory.
///
/// Every call reads or rewrites a whole document; there is no caching, so
/// two processes sharing a directory simply see each other's last write.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShopError::Io)?;
        }
        Ok(())
    }

    /// A missing document reads as an empty collection.
    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(ShopError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<T> = serde_json::from_str(&content).map_err(ShopError::Serialization)?;
        debug!(file, count = items.len(), "loaded document");
        Ok(items)
    }

    fn store<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items).map_err(ShopError::Serialization)?;
        fs::write(self.root.join(file), content).map_err(ShopError::Io)?;
        Ok(())
    }

    fn delete_from(&self, file: &str, id: &Uuid) -> Result<bool> {
        let mut items: Vec<CartItem> = self.load(file)?;
        let before = items.len();
        items.retain(|it| it.id != *id);
        if items.len() == before {
            return Ok(false);
        }
        self.store(file, &items)?;
        Ok(true)
    }
}

impl DataStore for FileStore {
    fn list_products(&self) -> Result<Vec<Product>> {
        self.load(PRODUCTS_FILE)
    }

    fn get_product(&self, id: ProductId) -> Result<Product> {
        self.list_products()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(ShopError::ProductNotFound(id))
    }

    fn replace_products(&mut self, products: Vec<Product>) -> Result<()> {
        self.store(PRODUCTS_FILE, &products)
    }

    fn list_cart(&self) -> Result<Vec<CartItem>> {
        self.load(CART_FILE)
    }

    fn save_cart_item(&mut self, item: &CartItem) -> Result<()> {
        let mut cart = self.list_cart()?;
        upsert(&mut cart, item);
        self.store(CART_FILE, &cart)
    }

    fn delete_cart_item(&mut self, id: &Uuid) -> Result<()> {
        if !self.delete_from(CART_FILE, id)? {
            return Err(ShopError::CartItemNotFound(*id));
        }
        Ok(())
    }

    fn list_saved(&self) -> Result<Vec<CartItem>> {
        self.load(SAVED_FILE)
    }

    fn save_saved_item(&mut self, item: &CartItem) -> Result<()> {
        let mut saved = self.list_saved()?;
        upsert(&mut saved, item);
        self.store(SAVED_FILE, &saved)
    }

    fn delete_saved_item(&mut self, id: &Uuid) -> Result<()> {
        if !self.delete_from(SAVED_FILE, id)? {
            return Err(ShopError::SavedItemNotFound(*id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCartItem;
    use crate::store::memory::fixtures::sample_catalog;
    use tempfile::tempdir;

    #[test]
    fn empty_dir_reads_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing"));
        assert!(store.list_products().unwrap().is_empty());
        assert!(store.list_cart().unwrap().is_empty());
        assert!(store.list_saved().unwrap().is_empty());
    }

    #[test]
    fn catalog_persists_in_order() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.replace_products(sample_catalog()).unwrap();

        let reopened = FileStore::new(dir.path().to_path_buf());
        let ids: Vec<_> = reopened.list_products().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
        assert_eq!(reopened.get_product(5).unwrap().name, "Dino Tee");
        assert!(matches!(
            reopened.get_product(42),
            Err(ShopError::ProductNotFound(42))
        ));
    }

    #[test]
    fn cart_lines_update_and_delete() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        let mut item = NewCartItem::from_product(&Product::new(1, "Tee", 499.0)).into_item();

        store.save_cart_item(&item).unwrap();
        item.qty = 3;
        store.save_cart_item(&item).unwrap();

        let cart = store.list_cart().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].qty, 3);

        store.delete_cart_item(&item.id).unwrap();
        assert!(store.list_cart().unwrap().is_empty());
        assert!(matches!(
            store.delete_cart_item(&item.id),
            Err(ShopError::CartItemNotFound(_))
        ));
    }

    #[test]
    fn saved_items_are_separate_from_cart() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        let item = NewCartItem::from_product(&Product::new(1, "Tee", 499.0)).into_item();

        store.save_saved_item(&item).unwrap();
        assert!(store.list_cart().unwrap().is_empty());
        assert_eq!(store.list_saved().unwrap().len(), 1);

        store.delete_saved_item(&item.id).unwrap();
        assert!(store.list_saved().unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PRODUCTS_FILE), "{not json").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.list_products(),
            Err(ShopError::Serialization(_))
        ));
    }
}
