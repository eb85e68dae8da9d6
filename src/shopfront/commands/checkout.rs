//! Checkout price breakdown.
//!
//! ```text
//! totalMrp        Σ (mrp or price) × qty
//! discountOnMrp   Σ max(mrp − price, 0) × qty
//! couponDiscount  coupon applied to totalMrp − discountOnMrp, capped
//! eligible        max(totalMrp − discountOnMrp − couponDiscount, 0)
//! shipping        option price; express is free once eligible ≥ threshold
//! grandTotal      eligible + shipping + platformFee
//! ```
//!
//! An empty cart costs nothing: no shipping and no platform fee.

use crate::commands::cart::{CartView, cart_view};
use crate::commands::shipping::{self, ShippingId, ShippingOption};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShopConfig;
use crate::error::{Result, ShopError};
use crate::store::DataStore;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetails {
    pub total_mrp: f64,
    pub discount_on_mrp: f64,
    pub coupon_discount: f64,
    pub shipping: f64,
    pub platform_fee: f64,
    pub grand_total: f64,
}

impl PriceDetails {
    /// Merchandise total after MRP and coupon discounts.
    pub fn eligible_subtotal(&self) -> f64 {
        (self.total_mrp - self.discount_on_mrp - self.coupon_discount).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreeShippingProgress {
    pub threshold: f64,
    pub eligible_subtotal: f64,
    pub remaining: f64,
    /// Whole percent, 0..=100
    pub pct: u32,
    pub unlocked: bool,
}

impl FreeShippingProgress {
    pub fn new(eligible_subtotal: f64, threshold: f64) -> Self {
        let remaining = (threshold - eligible_subtotal).max(0.0);
        let pct = if threshold > 0.0 {
            (eligible_subtotal / threshold * 100.0).round().clamp(0.0, 100.0) as u32
        } else {
            100
        };
        Self {
            threshold,
            eligible_subtotal,
            remaining,
            pct,
            unlocked: remaining == 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedCoupon {
    pub code: String,
    pub discount: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub coupon: Option<String>,
    pub postal_code: Option<String>,
    /// Preferred option; the quote's default when missing or unavailable
    pub shipping: Option<ShippingId>,
}

#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub cart: CartView,
    pub price: PriceDetails,
    pub coupon: Option<AppliedCoupon>,
    pub shipping: Option<ShippingOption>,
    pub progress: FreeShippingProgress,
}

/// Picks the shipping option for the order. Without a postal code there is
/// nothing to check availability against, so the requested option is
/// assumed deliverable at its configured price.
fn choose_shipping(
    config: &ShopConfig,
    request: &CheckoutRequest,
    result: &mut CmdResult,
) -> Result<ShippingOption> {
    let wanted = request.shipping.unwrap_or(ShippingId::Standard);

    let Some(code) = &request.postal_code else {
        let price = match wanted {
            ShippingId::Standard => config.standard_shipping,
            ShippingId::Express => config.express_shipping,
        };
        let label = match wanted {
            ShippingId::Standard => "Standard",
            ShippingId::Express => "Express",
        };
        return Ok(ShippingOption {
            id: wanted,
            label: label.to_string(),
            price,
            eta: String::new(),
            available: true,
        });
    };

    let quote = shipping::quote(config, code)?;
    if let Some(option) = quote.option(wanted).filter(|o| o.available) {
        return Ok(option.clone());
    }

    let fallback = quote
        .selected_option()
        .cloned()
        .ok_or_else(|| ShopError::Api(format!("No delivery to {}", quote.postal_code)))?;
    warn!(wanted = %wanted, postal_code = %quote.postal_code, "shipping option unavailable");
    result.add_message(CmdMessage::warning(format!(
        "{} delivery is not available for {}; using {}",
        wanted, quote.postal_code, fallback.label
    )));
    Ok(fallback)
}

fn apply_coupon(config: &ShopConfig, code: &str, subtotal: f64) -> Result<AppliedCoupon> {
    let code = code.trim().to_uppercase();
    let coupon = config.coupon(&code).ok_or_else(|| ShopError::InvalidCoupon {
        code: code.clone(),
        reason: "unknown code".to_string(),
    })?;
    Ok(AppliedCoupon {
        discount: coupon.discount_on(subtotal)?,
        code,
    })
}

pub fn summarize<S: DataStore>(
    store: &S,
    config: &ShopConfig,
    request: &CheckoutRequest,
    result: &mut CmdResult,
) -> Result<CheckoutSummary> {
    let cart = cart_view(store)?;

    let total_mrp: f64 = cart.items.iter().map(|it| it.line_mrp()).sum();
    let discount_on_mrp: f64 = cart
        .items
        .iter()
        .map(|it| it.unit_savings() * f64::from(it.qty))
        .sum();

    let coupon = request
        .coupon
        .as_deref()
        .map(|code| apply_coupon(config, code, total_mrp - discount_on_mrp))
        .transpose()?;

    let mut price = PriceDetails {
        total_mrp,
        discount_on_mrp,
        coupon_discount: coupon.as_ref().map_or(0.0, |c| c.discount),
        ..PriceDetails::default()
    };
    let eligible = price.eligible_subtotal();
    let progress = FreeShippingProgress::new(eligible, config.free_shipping_threshold);

    let shipping = if cart.is_empty() {
        None
    } else {
        let option = choose_shipping(config, request, result)?;
        price.shipping = match option.id {
            ShippingId::Express if progress.unlocked => 0.0,
            _ => option.price,
        };
        price.platform_fee = config.platform_fee;
        if progress.unlocked && option.id == ShippingId::Standard {
            result.add_message(CmdMessage::info(
                "You unlocked Free Express shipping. You can switch to Express.",
            ));
        }
        Some(option)
    };
    price.grand_total = eligible + price.shipping + price.platform_fee;

    debug!(
        lines = cart.items.len(),
        grand_total = price.grand_total,
        "checkout summary"
    );
    Ok(CheckoutSummary {
        cart,
        price,
        coupon,
        shipping,
        progress,
    })
}

pub fn run<S: DataStore>(
    store: &S,
    config: &ShopConfig,
    request: &CheckoutRequest,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let summary = summarize(store, config, request, &mut result)?;
    Ok(result.with_checkout(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;

    fn big_cart() -> InMemoryStore {
        // 1299 (MRP 1999) + 1499 (MRP 2999)
        StoreFixture::new()
            .with_catalog()
            .with_cart_line(1, 1)
            .with_cart_line(3, 1)
            .store
    }

    fn small_cart() -> InMemoryStore {
        // 399 (MRP 499)
        StoreFixture::new().with_catalog().with_cart_line(5, 1).store
    }

    fn summary(store: &InMemoryStore, request: CheckoutRequest) -> (CheckoutSummary, CmdResult) {
        let mut result = run(store, &ShopConfig::default(), &request).unwrap();
        let summary = result.checkout.take().unwrap();
        (summary, result)
    }

    #[test]
    fn breakdown_without_coupon() {
        let (s, result) = summary(&big_cart(), CheckoutRequest::default());
        assert_eq!(s.price.total_mrp, 4998.0);
        assert_eq!(s.price.discount_on_mrp, 2200.0);
        assert_eq!(s.price.coupon_discount, 0.0);
        assert_eq!(s.price.shipping, 49.0);
        assert_eq!(s.price.platform_fee, 20.0);
        assert_eq!(s.price.grand_total, 2798.0 + 49.0 + 20.0);
        assert!(s.progress.unlocked);
        // Standard picked while Express is free.
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn percent_coupon_is_capped() {
        let request = CheckoutRequest {
            coupon: Some("welcome10".into()),
            ..CheckoutRequest::default()
        };
        let (s, _) = summary(&big_cart(), request);
        let coupon = s.coupon.unwrap();
        assert_eq!(coupon.code, "WELCOME10");
        assert_eq!(coupon.discount, 200.0);
        assert_eq!(s.price.eligible_subtotal(), 2598.0);
        assert_eq!(s.price.grand_total, 2598.0 + 49.0 + 20.0);
    }

    #[test]
    fn express_is_free_once_unlocked() {
        let request = CheckoutRequest {
            shipping: Some(ShippingId::Express),
            ..CheckoutRequest::default()
        };
        let (s, result) = summary(&big_cart(), request);
        assert_eq!(s.shipping.unwrap().id, ShippingId::Express);
        assert_eq!(s.price.shipping, 0.0);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn express_is_charged_below_threshold() {
        let request = CheckoutRequest {
            shipping: Some(ShippingId::Express),
            ..CheckoutRequest::default()
        };
        let (s, _) = summary(&small_cart(), request);
        assert_eq!(s.price.shipping, 99.0);
        assert_eq!(s.price.grand_total, 399.0 + 99.0 + 20.0);
        assert!(!s.progress.unlocked);
        assert_eq!(s.progress.remaining, 100.0);
        assert_eq!(s.progress.pct, 80);
    }

    #[test]
    fn coupon_below_minimum_is_rejected() {
        let request = CheckoutRequest {
            coupon: Some("FLAT100".into()),
            ..CheckoutRequest::default()
        };
        let err = run(&small_cart(), &ShopConfig::default(), &request).unwrap_err();
        assert!(matches!(err, ShopError::InvalidCoupon { .. }));
    }

    #[test]
    fn unknown_coupon_is_rejected() {
        let request = CheckoutRequest {
            coupon: Some("FREEBIE".into()),
            ..CheckoutRequest::default()
        };
        assert!(matches!(
            run(&big_cart(), &ShopConfig::default(), &request),
            Err(ShopError::InvalidCoupon { .. })
        ));
    }

    #[test]
    fn unavailable_express_falls_back_to_standard() {
        let request = CheckoutRequest {
            postal_code: Some("555001".into()),
            shipping: Some(ShippingId::Express),
            ..CheckoutRequest::default()
        };
        let (s, result) = summary(&small_cart(), request);
        let option = s.shipping.unwrap();
        assert_eq!(option.id, ShippingId::Standard);
        assert_eq!(option.eta, "3\u{2013}5 days");
        assert_eq!(s.price.shipping, 49.0);
        assert!(
            result
                .messages
                .iter()
                .any(|m| m.level == MessageLevel::Warning)
        );
    }

    #[test]
    fn invalid_postal_code_is_an_error() {
        let request = CheckoutRequest {
            postal_code: Some("12".into()),
            ..CheckoutRequest::default()
        };
        assert!(matches!(
            run(&small_cart(), &ShopConfig::default(), &request),
            Err(ShopError::InvalidPostalCode(_))
        ));
    }

    #[test]
    fn empty_cart_costs_nothing() {
        let (s, result) = summary(&InMemoryStore::new(), CheckoutRequest::default());
        assert_eq!(s.price, PriceDetails::default());
        assert!(s.shipping.is_none());
        assert_eq!(s.progress.pct, 0);
        assert_eq!(s.progress.remaining, 499.0);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(FreeShippingProgress::new(2000.0, 499.0).pct, 100);
        assert_eq!(FreeShippingProgress::new(0.0, 499.0).pct, 0);
        assert!(FreeShippingProgress::new(10.0, 0.0).unlocked);
    }
}
