use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type ProductId = u64;

/// Shopper-facing department. `All` is only meaningful as a filter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    All,
    Men,
    Women,
    Kids,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::All => "all",
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Kids => "kids",
        }
    }

    /// `All` matches everything; otherwise the product's gender or category
    /// must name this department.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Gender::All => true,
            g => {
                product.gender.eq_ignore_ascii_case(g.as_str())
                    || product.category.eq_ignore_ascii_case(g.as_str())
            }
        }
    }
}

impl Gender {
    /// Stricter than [`Gender::matches`]: only the product's own gender
    /// field counts. Used to scope the price range.
    pub fn owns(&self, product: &Product) -> bool {
        match self {
            Gender::All => true,
            g => product.gender.eq_ignore_ascii_case(g.as_str()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Gender::All),
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            "kids" => Ok(Gender::Kids),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub avg: f64,
    #[serde(default)]
    pub count: u64,
}

/// A catalog entry as served by the product API.
///
/// Every field except `id` and `name` may be missing from the payload and
/// falls back to an empty or zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<f64>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub stock: BTreeMap<String, u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Percentage off: derived from MRP when it is above the selling price,
    /// else the explicit discount field, else zero.
    pub fn effective_discount(&self) -> f64 {
        match self.mrp {
            Some(mrp) if mrp > self.price && mrp > 0.0 => {
                ((mrp - self.price) / mrp * 100.0).round()
            }
            _ => self.discount_pct.unwrap_or(0.0),
        }
    }

    /// Units on hand for a size. Products without a stock table report zero.
    pub fn stock_for(&self, size: &str) -> u32 {
        self.stock.get(size).copied().unwrap_or(0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One line of the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default = "default_qty")]
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub added_at: DateTime<Utc>,
}

fn default_qty() -> u32 {
    1
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }

    /// MRP of the line, falling back to the selling price.
    pub fn line_mrp(&self) -> f64 {
        self.mrp.unwrap_or(self.price) * f64::from(self.qty)
    }

    pub fn unit_savings(&self) -> f64 {
        (self.mrp.unwrap_or(self.price) - self.price).max(0.0)
    }
}

/// Request to put a product into the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub mrp: Option<f64>,
    pub qty: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl NewCartItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            mrp: product.mrp,
            qty: 1,
            size: None,
            color: None,
        }
    }

    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn into_item(self) -> CartItem {
        CartItem {
            id: Uuid::new_v4(),
            product_id: self.product_id,
            name: self.name,
            price: self.price,
            mrp: self.mrp,
            qty: self.qty,
            size: self.size,
            color: self.color,
            added_at: Utc::now(),
        }
    }

    /// Size and color only narrow the match when the request names them.
    pub fn same_line_as(&self, item: &CartItem) -> bool {
        item.product_id == self.product_id
            && self.size.as_ref().is_none_or(|s| item.size.as_ref() == Some(s))
            && self
                .color
                .as_ref()
                .is_none_or(|c| item.color.as_ref() == Some(c))
    }
}
