//! Facet extraction.
//!
//! Each facet is counted against the catalog filtered by every active clause
//! except that facet's own selection. Picking "Nike" therefore leaves Nike's
//! count where it was while the other brands shrink to what is compatible
//! with everything else on screen.

use super::predicate::Predicate;
use super::state::{Facet, FilterState, kids_size_start, letter_size_rank};
use crate::model::{Gender, Product};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

const OTHER_SUB_CATEGORY: &str = "Other";
const UNNAMED_COLOR: &str = "Color";
const UNNAMED_BRAND: &str = "Brand";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub sub_categories: Vec<FacetCount>,
    pub sizes: Vec<FacetCount>,
    pub colors: Vec<FacetCount>,
    pub brands: Vec<FacetCount>,
    pub price_range: PriceRange,
    /// Products passing the full predicate.
    pub result_count: usize,
}

impl Facets {
    pub fn counts(&self, facet: Facet) -> &[FacetCount] {
        match facet {
            Facet::SubCategory => &self.sub_categories,
            Facet::Size => &self.sizes,
            Facet::Color => &self.colors,
            Facet::Brand => &self.brands,
        }
    }

    pub fn count_of(&self, facet: Facet, value: &str) -> usize {
        self.counts(facet)
            .iter()
            .find(|fc| fc.value == value)
            .map_or(0, |fc| fc.count)
    }
}

/// Counts in first-seen order.
#[derive(Default)]
struct Tally {
    counts: Vec<FacetCount>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn bump(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&i) => self.counts[i].count += 1,
            None => {
                self.index.insert(value.to_string(), self.counts.len());
                self.counts.push(FacetCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    fn into_counts(self) -> Vec<FacetCount> {
        self.counts
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn count_facet(products: &[Product], predicate: &Predicate, facet: Facet) -> Vec<FacetCount> {
    let mut tally = Tally::default();
    for product in products
        .iter()
        .filter(|p| predicate.matches_except(p, facet))
    {
        match facet {
            Facet::SubCategory => tally.bump(or_default(&product.sub_category, OTHER_SUB_CATEGORY)),
            Facet::Size => product.sizes.iter().for_each(|s| tally.bump(s)),
            Facet::Color => product
                .colors
                .iter()
                .for_each(|c| tally.bump(or_default(&c.name, UNNAMED_COLOR))),
            Facet::Brand => tally.bump(or_default(&product.brand, UNNAMED_BRAND)),
        }
    }
    tally.into_counts()
}

/// Min and max price over products whose gender field names the
/// department, `0..0` for an empty scope. Category alone does not count.
pub fn price_range(products: &[Product], gender: Gender) -> PriceRange {
    let mut prices = products
        .iter()
        .filter(|p| gender.owns(p))
        .map(|p| p.price);
    let Some(first) = prices.next() else {
        return PriceRange::default();
    };
    prices.fold(PriceRange { min: first, max: first }, |range, price| PriceRange {
        min: range.min.min(price),
        max: range.max.max(price),
    })
}

pub fn extract(products: &[Product], state: &FilterState) -> Facets {
    let predicate = Predicate::new(state);

    Facets {
        sub_categories: count_facet(products, &predicate, Facet::SubCategory),
        sizes: count_facet(products, &predicate, Facet::Size),
        colors: count_facet(products, &predicate, Facet::Color),
        brands: count_facet(products, &predicate, Facet::Brand),
        price_range: price_range(products, state.gender),
        result_count: products.iter().filter(|p| predicate.matches(p)).count(),
    }
}

/// Sort group of a size: kids ranges by starting age, then XS..XXL, then
/// plain numbers, then anything else alphabetically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SizeRank {
    Kids(u32),
    Letter(usize),
    Numeric(u64),
    Other(String),
}

fn size_rank(size: &str) -> SizeRank {
    if let Some(age) = kids_size_start(size) {
        return SizeRank::Kids(age);
    }
    if let Some(rank) = letter_size_rank(size) {
        return SizeRank::Letter(rank);
    }
    let digits: String = size.chars().filter(char::is_ascii_digit).collect();
    match digits.parse() {
        Ok(n) => SizeRank::Numeric(n),
        Err(_) => SizeRank::Other(size.to_uppercase()),
    }
}

/// Size counts as a shopper in `gender` should see them: only the sizes
/// that department uses, in natural order.
pub fn size_options(sizes: &[FacetCount], gender: Gender) -> Vec<FacetCount> {
    let mut options: Vec<FacetCount> = sizes
        .iter()
        .filter(|fc| match gender {
            Gender::Kids => kids_size_start(&fc.value).is_some(),
            _ => letter_size_rank(&fc.value).is_some(),
        })
        .cloned()
        .collect();
    options.sort_by(|a, b| match size_rank(&a.value).cmp(&size_rank(&b.value)) {
        Ordering::Equal => a.value.cmp(&b.value),
        ord => ord,
    });
    options
}
