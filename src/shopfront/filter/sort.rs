//! Listing order.
//!
//! All orderings go through a stable sort, so products the key cannot tell
//! apart keep their catalog order and sorting twice changes nothing.

use super::state::SortKey;
use crate::model::Product;

/// Text-match strength plus a popularity tiebreaker.
///
/// +3 when the name contains the query, +2 for the brand, +1 for the
/// category, all case-insensitive, plus `rating.count / 1000`. An empty
/// query scores on popularity alone.
pub fn relevance_score(product: &Product, query: &str) -> f64 {
    let mut score = 0.0;
    if !query.is_empty() {
        let q = query.to_lowercase();
        if product.name.to_lowercase().contains(&q) {
            score += 3.0;
        }
        if product.brand.to_lowercase().contains(&q) {
            score += 2.0;
        }
        if product.category.to_lowercase().contains(&q) {
            score += 1.0;
        }
    }
    score + product.rating.count as f64 / 1000.0
}

/// Returns the products in `key` order without touching the input.
pub fn sorted<'a, I>(products: I, key: SortKey, query: &str) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut list: Vec<&Product> = products.into_iter().collect();
    match key {
        SortKey::PriceAsc => list.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => list.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Rating => list.sort_by(|a, b| b.rating.avg.total_cmp(&a.rating.avg)),
        SortKey::New => list.sort_by(|a, b| {
            b.has_tag("new")
                .cmp(&a.has_tag("new"))
                .then_with(|| b.rating.count.cmp(&a.rating.count))
        }),
        SortKey::Relevance => {
            let mut scored: Vec<(f64, &Product)> = list
                .into_iter()
                .map(|p| (relevance_score(p, query), p))
                .collect();
            scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
            list = scored.into_iter().map(|(_, p)| p).collect();
        }
    }
    list
}
