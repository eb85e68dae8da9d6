use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShopError};
use crate::model::Product;
use crate::store::DataStore;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Accepted catalog documents: a bare product array, or a mock REST
/// database with the products under `clothingProducts`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Products(Vec<Product>),
    Database {
        #[serde(rename = "clothingProducts")]
        clothing_products: Vec<Product>,
    },
}

pub fn parse_catalog(json: &str) -> Result<Vec<Product>> {
    let doc: CatalogDocument = serde_json::from_str(json).map_err(ShopError::Serialization)?;
    Ok(match doc {
        CatalogDocument::Products(products) => products,
        CatalogDocument::Database { clothing_products } => clothing_products,
    })
}

/// Replaces the catalog with the products in `path`. Products repeating an
/// earlier id are dropped so lookups by id stay unambiguous.
pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(ShopError::Io)?;
    let parsed = parse_catalog(&content)?;

    let mut result = CmdResult::default();
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(parsed.len());
    for product in parsed {
        if seen.insert(product.id) {
            products.push(product);
        } else {
            warn!(id = product.id, "duplicate product id in catalog");
            result.add_message(CmdMessage::warning(format!(
                "Skipped duplicate product id {} ({})",
                product.id, product.name
            )));
        }
    }

    let count = products.len();
    store.replace_products(products)?;
    info!(count, path = %path.display(), "catalog imported");
    result.add_message(CmdMessage::success(format!(
        "Imported {} product(s) from {}",
        count,
        path.display()
    )));
    Ok(result)
}
