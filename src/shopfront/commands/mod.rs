use crate::config::ShopConfig;
use crate::error::Result;
use crate::model::{CartItem, Product};
use std::path::PathBuf;

pub mod browse;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod helpers;
pub mod import;
pub mod saved;
pub mod search;
pub mod shipping;
pub mod view;

pub use browse::Listing;
pub use cart::CartView;
pub use checkout::{CheckoutSummary, FreeShippingProgress, PriceDetails};
pub use shipping::{ShippingId, ShippingOption, ShippingQuote};
pub use view::ProductDetail;

#[derive(Debug, Clone)]
pub struct ShopPaths {
    pub data_dir: PathBuf,
}

impl ShopPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn load_config(&self) -> Result<ShopConfig> {
        ShopConfig::load(&self.data_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Everything a command hands back to the UI. Commands fill only the parts
/// they produce; the rest stays empty.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub listing: Option<Listing>,
    /// Plain product lists, such as search suggestions
    pub products: Vec<Product>,
    pub detail: Option<ProductDetail>,
    /// Lines created or changed by the command
    pub affected_items: Vec<CartItem>,
    pub cart: Option<CartView>,
    pub saved: Vec<CartItem>,
    pub shipping: Option<ShippingQuote>,
    pub checkout: Option<CheckoutSummary>,
    pub config: Option<ShopConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_detail(mut self, detail: ProductDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_affected_items(mut self, items: Vec<CartItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_cart(mut self, cart: CartView) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn with_saved(mut self, saved: Vec<CartItem>) -> Self {
        self.saved = saved;
        self
    }

    pub fn with_shipping(mut self, quote: ShippingQuote) -> Self {
        self.shipping = Some(quote);
        self
    }

    pub fn with_checkout(mut self, summary: CheckoutSummary) -> Self {
        self.checkout = Some(summary);
        self
    }

    pub fn with_config(mut self, config: ShopConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
