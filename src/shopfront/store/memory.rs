use super::{DataStore, upsert};
use crate::error::{Result, ShopError};
use crate::model::{CartItem, Product, ProductId};
use std::collections::HashSet;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    products: Vec<Product>,
    cart: Vec<CartItem>,
    saved: Vec<CartItem>,
    failing_deletes: HashSet<Uuid>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Makes deleting the given cart line fail with a store error, the way a
    /// flaky remote cart would.
    pub fn fail_deletes_of(&mut self, id: Uuid) {
        self.failing_deletes.insert(id);
    }
}

impl DataStore for InMemoryStore {
    fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn get_product(&self, id: ProductId) -> Result<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ShopError::ProductNotFound(id))
    }

    fn replace_products(&mut self, products: Vec<Product>) -> Result<()> {
        self.products = products;
        Ok(())
    }

    fn list_cart(&self) -> Result<Vec<CartItem>> {
        Ok(self.cart.clone())
    }

    fn save_cart_item(&mut self, item: &CartItem) -> Result<()> {
        upsert(&mut self.cart, item);
        Ok(())
    }

    fn delete_cart_item(&mut self, id: &Uuid) -> Result<()> {
        if self.failing_deletes.contains(id) {
            return Err(ShopError::Store(format!("DELETE /cart/{} failed", id)));
        }
        let before = self.cart.len();
        self.cart.retain(|it| it.id != *id);
        if self.cart.len() == before {
            return Err(ShopError::CartItemNotFound(*id));
        }
        Ok(())
    }

    fn list_saved(&self) -> Result<Vec<CartItem>> {
        Ok(self.saved.clone())
    }

    fn save_saved_item(&mut self, item: &CartItem) -> Result<()> {
        upsert(&mut self.saved, item);
        Ok(())
    }

    fn delete_saved_item(&mut self, id: &Uuid) -> Result<()> {
        let before = self.saved.len();
        self.saved.retain(|it| it.id != *id);
        if self.saved.len() == before {
            return Err(ShopError::SavedItemNotFound(*id));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Color, Rating};
    use std::collections::BTreeMap;

    /// A small apparel catalog covering every department and facet.
    pub fn sample_catalog() -> Vec<Product> {
        #[allow(clippy::too_many_arguments)]
        fn product(
            id: ProductId,
            name: &str,
            brand: &str,
            gender: &str,
            sub: &str,
            price: f64,
            mrp: Option<f64>,
            sizes: &[&str],
            color: &str,
        ) -> Product {
            Product {
                id,
                name: name.to_string(),
                brand: brand.to_string(),
                category: capitalize(gender),
                sub_category: sub.to_string(),
                gender: gender.to_string(),
                price,
                mrp,
                sizes: sizes.iter().map(|s| s.to_string()).collect(),
                colors: vec![Color {
                    name: color.to_string(),
                    code: String::new(),
                }],
                stock: sizes.iter().map(|s| (s.to_string(), 5)).collect::<BTreeMap<_, _>>(),
                rating: Rating {
                    avg: 4.0,
                    count: id * 10,
                },
                ..Product::default()
            }
        }

        fn capitalize(s: &str) -> String {
            let mut chars = s.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }

        vec![
            product(1, "Oxford Shirt", "Arrow", "men", "Shirts", 1299.0, Some(1999.0), &["M", "L", "XL"], "Blue"),
            product(2, "Graphic Tee", "Puma", "men", "Tshirts", 599.0, Some(799.0), &["S", "M"], "Black"),
            product(3, "Printed Kurta", "Biba", "women", "Kurtas", 1499.0, Some(2999.0), &["S", "M", "L"], "Red"),
            product(4, "Running Tee", "Nike", "women", "Tshirts", 899.0, None, &["XS", "S"], "Black"),
            product(5, "Dino Tee", "Puma", "kids", "Tshirts", 399.0, Some(499.0), &["3-4Y", "5-6Y"], "Green"),
            product(6, "Denim Jacket", "Levis", "men", "Jackets", 2999.0, Some(3499.0), &["M", "L"], "Blue"),
        ]
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_catalog(mut self) -> Self {
            self.store.products = sample_catalog();
            self
        }

        pub fn with_product(mut self, product: Product) -> Self {
            self.store.products.push(product);
            self
        }

        pub fn with_cart_line(mut self, product_id: ProductId, qty: u32) -> Self {
            let product = self.store.get_product(product_id).unwrap();
            let item = crate::model::NewCartItem::from_product(&product)
                .with_qty(qty)
                .into_item();
            self.store.save_cart_item(&item).unwrap();
            self
        }
    }
}
