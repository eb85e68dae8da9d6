use crate::error::{Result, ShopError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`ShopConfig::get`] and [`ShopConfig::set`].
pub const SETTABLE_KEYS: [&str; 5] = [
    "currency-symbol",
    "free-shipping-threshold",
    "platform-fee",
    "standard-shipping",
    "express-shipping",
];

/// How a coupon takes money off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    /// Percentage of the discounted subtotal
    Percent(f64),
    /// Fixed amount
    Flat(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub kind: CouponKind,
    #[serde(default)]
    pub min_subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
}

impl Coupon {
    pub fn percent(code: &str, pct: f64) -> Self {
        Self {
            code: code.to_string(),
            kind: CouponKind::Percent(pct),
            min_subtotal: 0.0,
            max_discount: None,
        }
    }

    pub fn flat(code: &str, amount: f64) -> Self {
        Self {
            code: code.to_string(),
            kind: CouponKind::Flat(amount),
            min_subtotal: 0.0,
            max_discount: None,
        }
    }

    pub fn with_min_subtotal(mut self, min: f64) -> Self {
        self.min_subtotal = min;
        self
    }

    pub fn with_max_discount(mut self, max: f64) -> Self {
        self.max_discount = Some(max);
        self
    }

    /// Amount taken off `subtotal`, never more than the subtotal itself.
    pub fn discount_on(&self, subtotal: f64) -> Result<f64> {
        if subtotal < self.min_subtotal {
            return Err(ShopError::InvalidCoupon {
                code: self.code.clone(),
                reason: format!("needs a subtotal of at least {}", self.min_subtotal),
            });
        }
        let raw = match self.kind {
            CouponKind::Percent(pct) => (subtotal * pct / 100.0).round(),
            CouponKind::Flat(amount) => amount,
        };
        let capped = self.max_discount.map_or(raw, |cap| raw.min(cap));
        Ok(capped.clamp(0.0, subtotal.max(0.0)))
    }
}

/// Shop settings, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Eligible subtotal at which express shipping becomes free
    #[serde(default = "default_threshold")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_platform_fee")]
    pub platform_fee: f64,

    #[serde(default = "default_standard")]
    pub standard_shipping: f64,

    #[serde(default = "default_express")]
    pub express_shipping: f64,

    #[serde(default = "default_coupons")]
    pub coupons: Vec<Coupon>,
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_threshold() -> f64 {
    499.0
}

fn default_platform_fee() -> f64 {
    20.0
}

fn default_standard() -> f64 {
    49.0
}

fn default_express() -> f64 {
    99.0
}

fn default_coupons() -> Vec<Coupon> {
    vec![
        Coupon::percent("WELCOME10", 10.0).with_max_discount(200.0),
        Coupon::flat("FLAT100", 100.0).with_min_subtotal(999.0),
    ]
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            free_shipping_threshold: default_threshold(),
            platform_fee: default_platform_fee(),
            standard_shipping: default_standard(),
            express_shipping: default_express(),
            coupons: default_coupons(),
        }
    }
}

impl ShopConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShopError::Io)?;
        let config: ShopConfig =
            serde_json::from_str(&content).map_err(ShopError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShopError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ShopError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(ShopError::Io)?;
        Ok(())
    }

    /// Looks a coupon up by code, ignoring case and surrounding whitespace.
    pub fn coupon(&self, code: &str) -> Option<&Coupon> {
        let code = code.trim();
        self.coupons.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "currency-symbol" => Some(self.currency_symbol.clone()),
            "free-shipping-threshold" => Some(self.free_shipping_threshold.to_string()),
            "platform-fee" => Some(self.platform_fee.to_string()),
            "standard-shipping" => Some(self.standard_shipping.to_string()),
            "express-shipping" => Some(self.express_shipping.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if key == "currency-symbol" {
            if value.is_empty() {
                return Err("currency-symbol cannot be empty".to_string());
            }
            self.currency_symbol = value.to_string();
            return Ok(());
        }

        let slot = match key {
            "free-shipping-threshold" => &mut self.free_shipping_threshold,
            "platform-fee" => &mut self.platform_fee,
            "standard-shipping" => &mut self.standard_shipping,
            "express-shipping" => &mut self.express_shipping,
            _ => return Err(format!("Unknown config key: {}", key)),
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                *slot = v;
                Ok(())
            }
            _ => Err(format!("{} must be a non-negative number, got {:?}", key, value)),
        }
    }
}
