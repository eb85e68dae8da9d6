//! Active selections as removable chips.

use super::query::format_number;
use super::state::{Facet, FilterState};
use crate::model::Gender;

/// One active selection, removable on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedFilter {
    Search(String),
    Gender(Gender),
    Value(Facet, String),
    PriceMin(f64),
    PriceMax(f64),
    Rating(f64),
    Discount(f64),
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl AppliedFilter {
    pub fn label(&self, currency: &str) -> String {
        match self {
            AppliedFilter::Search(q) => format!("Search: \u{201c}{}\u{201d}", q),
            AppliedFilter::Gender(g) => format!("Gender: {}", capitalize(g.as_str())),
            AppliedFilter::Value(facet, v) => format!("{}: {}", facet.label(), v),
            AppliedFilter::PriceMin(v) => format!("Min {}{}", currency, format_number(*v)),
            AppliedFilter::PriceMax(v) => format!("Max {}{}", currency, format_number(*v)),
            AppliedFilter::Rating(v) => format!("{}\u{2605} & up", format_number(*v)),
            AppliedFilter::Discount(v) => format!("{}%+ off", format_number(*v)),
        }
    }
}

/// Lists the active selections. A locked department is part of the page
/// rather than a filter, so `hide_gender` leaves it out.
pub fn applied_filters(state: &FilterState, hide_gender: bool) -> Vec<AppliedFilter> {
    let mut chips = Vec::new();

    if !state.query.is_empty() {
        chips.push(AppliedFilter::Search(state.query.clone()));
    }
    if !hide_gender && state.gender != Gender::All {
        chips.push(AppliedFilter::Gender(state.gender));
    }
    for facet in Facet::ALL {
        chips.extend(
            state
                .selection(facet)
                .iter()
                .map(|v| AppliedFilter::Value(facet, v.to_string())),
        );
    }
    if let Some(min) = state.price_min {
        chips.push(AppliedFilter::PriceMin(min));
    }
    if let Some(max) = state.price_max {
        chips.push(AppliedFilter::PriceMax(max));
    }
    if state.rating_floor != 0.0 {
        chips.push(AppliedFilter::Rating(state.rating_floor));
    }
    if state.discount_floor != 0.0 {
        chips.push(AppliedFilter::Discount(state.discount_floor));
    }

    chips
}

impl FilterState {
    /// Clears exactly the selection a chip stands for.
    ///
    /// Dropping the gender chip goes back to all departments without pruning
    /// sizes, like any other chip removal.
    pub fn remove_filter(&mut self, filter: &AppliedFilter) {
        match filter {
            AppliedFilter::Search(_) => self.query.clear(),
            AppliedFilter::Gender(_) => self.gender = Gender::All,
            AppliedFilter::Value(facet, v) => {
                self.selection_mut(*facet).remove(v);
            }
            AppliedFilter::PriceMin(_) => self.price_min = None,
            AppliedFilter::PriceMax(_) => self.price_max = None,
            AppliedFilter::Rating(_) => self.rating_floor = 0.0,
            AppliedFilter::Discount(_) => self.discount_floor = 0.0,
        }
    }
}
