//! Filter and sort selections for the product listing.

use crate::model::Gender;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Letter sizes offered outside the kids department, smallest first.
pub const LETTER_SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

/// A multi-valued facet of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    SubCategory,
    Size,
    Color,
    Brand,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::SubCategory, Facet::Size, Facet::Color, Facet::Brand];

    /// Query-string key carrying this facet's selection.
    pub fn key(&self) -> &'static str {
        match self {
            Facet::SubCategory => "sub",
            Facet::Size => "size",
            Facet::Color => "color",
            Facet::Brand => "brand",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::SubCategory => "Category",
            Facet::Size => "Size",
            Facet::Color => "Color",
            Facet::Brand => "Brand",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Rating,
    New,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::Rating => "rating",
            SortKey::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevance",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Rating => "Customer Rating",
            SortKey::New => "New Arrivals",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortKey::Relevance),
            "priceAsc" => Ok(SortKey::PriceAsc),
            "priceDesc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            "new" => Ok(SortKey::New),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

/// The selected values of one facet.
///
/// Values are trimmed on the way in. Empty values and values containing a
/// comma are refused: selections travel comma-joined in the query string and
/// neither would come back out intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning whether it was accepted and new.
    pub fn insert(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || value.contains(',') {
            return false;
        }
        self.0.insert(value.to_string())
    }

    pub fn remove(&mut self, value: &str) -> bool {
        self.0.remove(value.trim())
    }

    /// Selects the value if absent, deselects it otherwise.
    pub fn toggle(&mut self, value: &str) {
        if !self.remove(value) {
            self.insert(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|v| keep(v));
    }

    /// Comma-joined form used in query strings.
    pub fn to_csv(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }

    /// Inverse of [`Selection::to_csv`]; blank entries are dropped.
    pub fn from_csv(csv: &str) -> Self {
        csv.split(',').collect()
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for value in iter {
            selection.insert(value);
        }
        selection
    }
}

/// Everything the shopper has chosen on the listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    pub gender: Gender,
    pub sub_categories: Selection,
    pub sizes: Selection,
    pub colors: Selection,
    pub brands: Selection,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rating_floor: f64,
    pub discount_floor: f64,
    pub sort: SortKey,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, facet: Facet) -> &Selection {
        match facet {
            Facet::SubCategory => &self.sub_categories,
            Facet::Size => &self.sizes,
            Facet::Color => &self.colors,
            Facet::Brand => &self.brands,
        }
    }

    pub fn selection_mut(&mut self, facet: Facet) -> &mut Selection {
        match facet {
            Facet::SubCategory => &mut self.sub_categories,
            Facet::Size => &mut self.sizes,
            Facet::Color => &mut self.colors,
            Facet::Brand => &mut self.brands,
        }
    }

    /// Switches department. A change of gender drops size selections that
    /// make no sense in the new department; re-selecting the current gender
    /// leaves them alone.
    pub fn set_gender(&mut self, gender: Gender) {
        if self.gender == gender {
            return;
        }
        self.gender = gender;
        if gender == Gender::Kids {
            self.sizes.retain(is_kids_size);
        } else {
            self.sizes.retain(is_letter_size);
        }
    }

    /// A fresh state, keeping the department when it is locked.
    pub fn cleared(locked_gender: Option<Gender>) -> Self {
        Self {
            gender: locked_gender.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Kids sizes are age ranges such as `3-4Y` or `10-12y`.
pub fn is_kids_size(size: &str) -> bool {
    kids_size_start(size).is_some()
}

/// Starting age of a kids size, if `size` is one.
pub fn kids_size_start(size: &str) -> Option<u32> {
    let body = size
        .strip_suffix('Y')
        .or_else(|| size.strip_suffix('y'))?;
    let (from, to) = body.split_once('-')?;
    let is_age = |s: &str| (1..=2).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit());
    if is_age(from) && is_age(to) {
        from.parse().ok()
    } else {
        None
    }
}

pub fn is_letter_size(size: &str) -> bool {
    letter_size_rank(size).is_some()
}

/// Position of a letter size in XS..XXL, case-insensitive.
pub fn letter_size_rank(size: &str) -> Option<usize> {
    LETTER_SIZES
        .iter()
        .position(|l| l.eq_ignore_ascii_case(size))
}
