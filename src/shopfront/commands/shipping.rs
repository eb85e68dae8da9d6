//! Delivery options for a postal code.
//!
//! Stands in for the courier lookup: any well-formed code gets standard
//! delivery, express is refused for a few blocked prefixes, and five-digit
//! (ZIP style) codes get longer transit estimates than six-digit PINs.

use crate::commands::CmdResult;
use crate::config::ShopConfig;
use crate::error::{Result, ShopError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const EXPRESS_BLOCKED_PREFIXES: [&str; 3] = ["000", "123", "555"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingId {
    Standard,
    Express,
}

impl ShippingId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingId::Standard => "standard",
            ShippingId::Express => "express",
        }
    }
}

impl fmt::Display for ShippingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ShippingId::Standard),
            "express" => Ok(ShippingId::Express),
            other => Err(format!("Unknown shipping option: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingOption {
    pub id: ShippingId,
    pub label: String,
    pub price: f64,
    pub eta: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuote {
    pub postal_code: String,
    pub options: Vec<ShippingOption>,
    /// Standard when available, else the first available option
    pub selected: Option<ShippingId>,
}

impl ShippingQuote {
    pub fn option(&self, id: ShippingId) -> Option<&ShippingOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn selected_option(&self) -> Option<&ShippingOption> {
        self.selected.and_then(|id| self.option(id))
    }
}

/// Five or six ASCII digits after trimming.
pub fn normalize_postal_code(raw: &str) -> Result<String> {
    let code = raw.trim();
    let valid = (5..=6).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(ShopError::InvalidPostalCode(code.to_string()));
    }
    Ok(code.to_string())
}

pub fn quote(config: &ShopConfig, postal_code: &str) -> Result<ShippingQuote> {
    let code = normalize_postal_code(postal_code)?;

    let express_available = !EXPRESS_BLOCKED_PREFIXES
        .iter()
        .any(|prefix| code.starts_with(prefix));
    let (standard_eta, express_eta) = if code.len() == 5 {
        ("4\u{2013}7 days", "2\u{2013}3 days")
    } else {
        ("3\u{2013}5 days", "1\u{2013}2 days")
    };

    let options = vec![
        ShippingOption {
            id: ShippingId::Standard,
            label: "Standard".to_string(),
            price: config.standard_shipping,
            eta: standard_eta.to_string(),
            available: true,
        },
        ShippingOption {
            id: ShippingId::Express,
            label: "Express".to_string(),
            price: config.express_shipping,
            eta: express_eta.to_string(),
            available: express_available,
        },
    ];
    let selected = options
        .iter()
        .find(|o| o.id == ShippingId::Standard && o.available)
        .or_else(|| options.iter().find(|o| o.available))
        .map(|o| o.id);

    Ok(ShippingQuote {
        postal_code: code,
        options,
        selected,
    })
}

pub fn run(config: &ShopConfig, postal_code: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_shipping(quote(config, postal_code)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_pin_gets_both_options() {
        let q = quote(&ShopConfig::default(), " 560001 ").unwrap();
        assert_eq!(q.postal_code, "560001");
        assert_eq!(q.selected, Some(ShippingId::Standard));

        let standard = q.option(ShippingId::Standard).unwrap();
        assert_eq!(standard.price, 49.0);
        assert_eq!(standard.eta, "3\u{2013}5 days");

        let express = q.option(ShippingId::Express).unwrap();
        assert!(express.available);
        assert_eq!(express.price, 99.0);
        assert_eq!(express.eta, "1\u{2013}2 days");
    }

    #[test]
    fn five_digit_zip_gets_longer_estimates() {
        let q = quote(&ShopConfig::default(), "94107").unwrap();
        assert_eq!(q.option(ShippingId::Standard).unwrap().eta, "4\u{2013}7 days");
        assert_eq!(q.option(ShippingId::Express).unwrap().eta, "2\u{2013}3 days");
    }

    #[test]
    fn blocked_prefixes_have_no_express() {
        for code in ["000123", "12345", "555555"] {
            let q = quote(&ShopConfig::default(), code).unwrap();
            assert!(!q.option(ShippingId::Express).unwrap().available, "{}", code);
            assert_eq!(q.selected, Some(ShippingId::Standard));
        }
    }

    #[test]
    fn malformed_codes_are_rejected() {
        for code in ["", "1234", "1234567", "12a45", "56 001"] {
            assert!(
                matches!(
                    quote(&ShopConfig::default(), code),
                    Err(ShopError::InvalidPostalCode(_))
                ),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn prices_follow_config() {
        let config = ShopConfig {
            standard_shipping: 0.0,
            express_shipping: 150.0,
            ..ShopConfig::default()
        };
        let q = quote(&config, "400001").unwrap();
        assert_eq!(q.selected_option().unwrap().price, 0.0);
        assert_eq!(q.option(ShippingId::Express).unwrap().price, 150.0);
    }

    #[test]
    fn parses_option_ids() {
        assert_eq!("Express".parse::<ShippingId>(), Ok(ShippingId::Express));
        assert!("drone".parse::<ShippingId>().is_err());
    }
}
