use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::query::to_query_string;
use crate::filter::FilterState;
use crate::store::DataStore;

/// Most suggestions shown under the header search box.
pub const MAX_SUGGESTIONS: usize = 12;

/// Quick search for the header box: name, brand or category contains the
/// term, in catalog order. A blank term suggests nothing.
pub fn run<S: DataStore>(store: &S, term: &str) -> Result<CmdResult> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Ok(CmdResult::default());
    }

    let suggestions = store
        .list_products()?
        .into_iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&term)
                || p.brand.to_lowercase().contains(&term)
                || p.category.to_lowercase().contains(&term)
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    Ok(CmdResult::default().with_products(suggestions))
}

/// The listing link a suggestion leads to: the full results for the term.
pub fn listing_link(term: &str) -> String {
    let state = FilterState {
        query: term.trim().to_string(),
        ..FilterState::default()
    };
    format!("/products?{}", to_query_string(&state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn blank_term_suggests_nothing() {
        let store = StoreFixture::new().with_catalog().store;
        assert!(run(&store, "   ").unwrap().products.is_empty());
    }

    #[test]
    fn matches_name_brand_or_category() {
        let store = StoreFixture::new().with_catalog().store;

        let by_name: Vec<u64> = run(&store, "TEE").unwrap().products.iter().map(|p| p.id).collect();
        assert_eq!(by_name, [2, 4, 5]);

        let by_brand: Vec<u64> = run(&store, "puma").unwrap().products.iter().map(|p| p.id).collect();
        assert_eq!(by_brand, [2, 5]);

        let by_category: Vec<u64> = run(&store, "kids").unwrap().products.iter().map(|p| p.id).collect();
        assert_eq!(by_category, [5]);
    }

    #[test]
    fn caps_suggestions() {
        let products = (1..=20).map(|id| Product::new(id, "Basic Tee", 299.0)).collect();
        let store = InMemoryStore::with_products(products);
        let result = run(&store, "tee").unwrap();
        assert_eq!(result.products.len(), MAX_SUGGESTIONS);
        assert_eq!(result.products[0].id, 1);
    }

    #[test]
    fn link_encodes_term() {
        assert_eq!(listing_link(" dino tee "), "/products?search=dino%20tee");
    }
}
