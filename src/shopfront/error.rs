use thiserror::Error;
use uuid::Uuid;

use crate::model::ProductId;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Cart item not found: {0}")]
    CartItemNotFound(Uuid),

    #[error("Saved item not found: {0}")]
    SavedItemNotFound(Uuid),

    #[error("Enter a valid 5 or 6 digit postal code (got \"{0}\")")]
    InvalidPostalCode(String),

    #[error("Coupon {code} cannot be applied: {reason}")]
    InvalidCoupon { code: String, reason: String },

    #[error("Size {size} of product {product} is out of stock")]
    OutOfStock { product: ProductId, size: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ShopError>;
