//! The listing predicate.
//!
//! [`Predicate`] folds a [`FilterState`] into lowercase lookup sets once, so
//! testing each product is a handful of string comparisons. A product passes
//! when it satisfies every clause:
//!
//! | clause     | passes when                                                    |
//! |------------|----------------------------------------------------------------|
//! | gender     | `all`, or product gender/category names the department         |
//! | sub        | no selection, or product sub-category is selected              |
//! | size       | no selection, or any product size is selected (exact match)    |
//! | color      | no selection, or any product color name is selected            |
//! | brand      | no selection, or product brand is selected                     |
//! | price      | `price_min <= price <= price_max`, open ends when unset         |
//! | query      | empty, or a substring of name/brand/category/sub-category/tag  |
//! | rating     | average rating reaches the floor                               |
//! | discount   | effective discount reaches the floor                           |
//!
//! Text comparisons are case-insensitive except sizes.

use super::state::{Facet, FilterState};
use crate::model::{Gender, Product};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Predicate {
    gender: Gender,
    query: String,
    sub_categories: HashSet<String>,
    sizes: HashSet<String>,
    colors: HashSet<String>,
    brands: HashSet<String>,
    price_min: f64,
    price_max: f64,
    rating_floor: f64,
    discount_floor: f64,
}

fn lowered<'a>(values: impl Iterator<Item = &'a str>) -> HashSet<String> {
    values.map(str::to_lowercase).collect()
}

impl Predicate {
    pub fn new(state: &FilterState) -> Self {
        Self {
            gender: state.gender,
            query: state.query.to_lowercase(),
            sub_categories: lowered(state.sub_categories.iter()),
            sizes: state.sizes.iter().map(str::to_string).collect(),
            colors: lowered(state.colors.iter()),
            brands: lowered(state.brands.iter()),
            price_min: state.price_min.unwrap_or(f64::NEG_INFINITY),
            price_max: state.price_max.unwrap_or(f64::INFINITY),
            rating_floor: state.rating_floor,
            discount_floor: state.discount_floor,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.evaluate(product, None)
    }

    /// Applies every clause except the given facet's selection.
    pub fn matches_except(&self, product: &Product, ignore: Facet) -> bool {
        self.evaluate(product, Some(ignore))
    }

    fn evaluate(&self, product: &Product, ignore: Option<Facet>) -> bool {
        let applies = |facet: Facet| ignore != Some(facet);

        self.gender.matches(product)
            && (!applies(Facet::SubCategory) || self.sub_category_ok(product))
            && (!applies(Facet::Size) || self.size_ok(product))
            && (!applies(Facet::Color) || self.color_ok(product))
            && (!applies(Facet::Brand) || self.brand_ok(product))
            && self.price_ok(product)
            && self.query_ok(product)
            && product.rating.avg >= self.rating_floor
            && product.effective_discount() >= self.discount_floor
    }

    fn sub_category_ok(&self, product: &Product) -> bool {
        self.sub_categories.is_empty()
            || self
                .sub_categories
                .contains(&product.sub_category.to_lowercase())
    }

    fn size_ok(&self, product: &Product) -> bool {
        self.sizes.is_empty() || product.sizes.iter().any(|s| self.sizes.contains(s))
    }

    fn color_ok(&self, product: &Product) -> bool {
        self.colors.is_empty()
            || product
                .colors
                .iter()
                .any(|c| self.colors.contains(&c.name.to_lowercase()))
    }

    fn brand_ok(&self, product: &Product) -> bool {
        self.brands.is_empty() || self.brands.contains(&product.brand.to_lowercase())
    }

    fn price_ok(&self, product: &Product) -> bool {
        product.price >= self.price_min && product.price <= self.price_max
    }

    fn query_ok(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let hit = |field: &str| field.to_lowercase().contains(&self.query);
        hit(&product.name)
            || hit(&product.brand)
            || hit(&product.category)
            || hit(&product.sub_category)
            || product.tags.iter().any(|t| hit(t))
    }
}
