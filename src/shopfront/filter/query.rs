//! Listing state in the query string.
//!
//! Only fields that differ from their defaults are written, under fixed keys:
//!
//! ```text
//! search  cat  sub  size  color  brand  priceMin  priceMax  rating  discount  sort
//! ```
//!
//! Set-valued fields are comma-joined and every value is percent-encoded.
//! Reading also accepts `+` for a space, so a link copied from a browser's
//! address bar parses back into the same state.

use super::state::{FilterState, Selection, SortKey};
use crate::model::Gender;
use tracing::warn;

pub const KEY_SEARCH: &str = "search";
pub const KEY_GENDER: &str = "cat";
pub const KEY_SUB: &str = "sub";
pub const KEY_SIZE: &str = "size";
pub const KEY_COLOR: &str = "color";
pub const KEY_BRAND: &str = "brand";
pub const KEY_PRICE_MIN: &str = "priceMin";
pub const KEY_PRICE_MAX: &str = "priceMax";
pub const KEY_RATING: &str = "rating";
pub const KEY_DISCOUNT: &str = "discount";
pub const KEY_SORT: &str = "sort";

/// Shortest decimal form that parses back to the same value (`500`, `4.5`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

struct QueryWriter(Vec<String>);

impl QueryWriter {
    fn append_pair(&mut self, key: &str, value: &str) {
        self.0.push(format!("{}={}", key, urlencoding::encode(value)));
    }

    fn finish(self) -> String {
        self.0.join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

pub fn to_query_string(state: &FilterState) -> String {
    let mut out = QueryWriter(Vec::new());

    if !state.query.is_empty() {
        out.append_pair(KEY_SEARCH, &state.query);
    }
    if state.gender != Gender::All {
        out.append_pair(KEY_GENDER, state.gender.as_str());
    }
    for (key, selection) in [
        (KEY_SUB, &state.sub_categories),
        (KEY_SIZE, &state.sizes),
        (KEY_COLOR, &state.colors),
        (KEY_BRAND, &state.brands),
    ] {
        if !selection.is_empty() {
            out.append_pair(key, &selection.to_csv());
        }
    }
    if let Some(min) = state.price_min {
        out.append_pair(KEY_PRICE_MIN, &format_number(min));
    }
    if let Some(max) = state.price_max {
        out.append_pair(KEY_PRICE_MAX, &format_number(max));
    }
    if state.rating_floor != 0.0 {
        out.append_pair(KEY_RATING, &format_number(state.rating_floor));
    }
    if state.discount_floor != 0.0 {
        out.append_pair(KEY_DISCOUNT, &format_number(state.discount_floor));
    }
    if state.sort != SortKey::Relevance {
        out.append_pair(KEY_SORT, state.sort.as_str());
    }

    out.finish()
}

fn parse_number(key: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(key, value = raw, "ignoring non-numeric query parameter");
            None
        }
    }
}

/// Reads a query string (with or without the leading `?`) into a state.
///
/// Unknown keys are ignored. The first occurrence of a repeated key wins.
/// Malformed values fall back to the field default rather than failing, the
/// same way a stale bookmark should still open the listing.
pub fn from_query_string(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    let mut seen = std::collections::HashSet::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(raw_key);
        let value = decode(raw_value);
        if !seen.insert(key.clone()) {
            continue;
        }
        match key.as_str() {
            KEY_SEARCH => state.query = value,
            KEY_GENDER => {
                state.gender = value.parse().unwrap_or_else(|e| {
                    warn!("{}; showing all departments", e);
                    Gender::All
                })
            }
            KEY_SUB => state.sub_categories = Selection::from_csv(&value),
            KEY_SIZE => state.sizes = Selection::from_csv(&value),
            KEY_COLOR => state.colors = Selection::from_csv(&value),
            KEY_BRAND => state.brands = Selection::from_csv(&value),
            KEY_PRICE_MIN => state.price_min = parse_number(&key, &value),
            KEY_PRICE_MAX => state.price_max = parse_number(&key, &value),
            KEY_RATING => state.rating_floor = parse_number(&key, &value).unwrap_or(0.0),
            KEY_DISCOUNT => state.discount_floor = parse_number(&key, &value).unwrap_or(0.0),
            KEY_SORT => {
                state.sort = value.parse().unwrap_or_else(|e| {
                    warn!("{}; using relevance", e);
                    SortKey::Relevance
                })
            }
            _ => {}
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_state() -> FilterState {
        FilterState {
            query: "linen & co/shirts?".into(),
            gender: Gender::Women,
            sub_categories: Selection::from_csv("Kurtas,Tops"),
            sizes: Selection::from_csv("M,XL"),
            colors: Selection::from_csv("Off White,Navy"),
            brands: Selection::from_csv("W,Biba"),
            price_min: Some(0.0),
            price_max: Some(2499.5),
            rating_floor: 4.0,
            discount_floor: 30.0,
            sort: SortKey::PriceDesc,
        }
    }

    #[test]
    fn default_state_serializes_to_nothing() {
        assert_eq!(to_query_string(&FilterState::default()), "");
        assert_eq!(from_query_string(""), FilterState::default());
    }

    #[test]
    fn writes_only_non_default_fields() {
        let state = FilterState {
            gender: Gender::Men,
            sizes: Selection::from_csv("L,M"),
            sort: SortKey::PriceAsc,
            ..FilterState::default()
        };
        assert_eq!(to_query_string(&state), "cat=men&size=L%2CM&sort=priceAsc");
    }

    #[test]
    fn round_trips_a_busy_state() {
        let state = busy_state();
        let qs = to_query_string(&state);
        assert_eq!(from_query_string(&qs), state);
    }

    #[test]
    fn round_trips_varied_states() {
        let cases = vec![
            FilterState {
                query: "  padded tee ".into(),
                ..FilterState::default()
            },
            FilterState {
                query: "a+b=c 100% & more".into(),
                brands: Selection::from_csv("H&M,A+B,Tom=Tailor,50%"),
                ..FilterState::default()
            },
            FilterState {
                query: "kurta बच्चों".into(),
                colors: Selection::from_csv("Crème,Bleu ciel"),
                gender: Gender::Women,
                ..FilterState::default()
            },
            FilterState {
                price_max: Some(999.99),
                ..FilterState::default()
            },
            FilterState {
                price_min: Some(-0.0),
                rating_floor: -0.0,
                ..FilterState::default()
            },
            FilterState {
                price_min: Some(0.1),
                price_max: Some(1e21),
                rating_floor: 3.75,
                discount_floor: 12.5,
                ..FilterState::default()
            },
            FilterState {
                gender: Gender::Kids,
                sizes: Selection::from_csv("3-4Y,10-12Y"),
                sub_categories: Selection::from_csv("T-shirts & Polos"),
                sort: SortKey::New,
                ..FilterState::default()
            },
        ];

        for state in cases {
            let qs = to_query_string(&state);
            assert_eq!(from_query_string(&qs), state, "query string {:?}", qs);
        }
    }

    #[test]
    fn round_trips_each_sort_key() {
        for sort in [SortKey::Rating, SortKey::New, SortKey::PriceAsc] {
            let state = FilterState {
                sort,
                ..FilterState::default()
            };
            assert_eq!(from_query_string(&to_query_string(&state)), state);
        }
    }

    #[test]
    fn parses_hand_written_links() {
        let state = from_query_string("?cat=KIDS&size=3-4Y,+5-6Y,&search=dino+tee&rating=3.5");
        assert_eq!(state.gender, Gender::Kids);
        assert_eq!(state.sizes, Selection::from_csv("3-4Y,5-6Y"));
        assert_eq!(state.query, "dino tee");
        assert_eq!(state.rating_floor, 3.5);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let state = from_query_string("cat=pets&sort=cheapest&priceMin=abc&discount=NaN&rating=");
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn first_occurrence_wins() {
        let state = from_query_string("brand=Nike&brand=Puma");
        assert_eq!(state.brands, Selection::from_csv("Nike"));
    }

    #[test]
    fn numbers_print_without_trailing_zeros() {
        assert_eq!(format_number(500.0), "500");
        assert_eq!(format_number(4.5), "4.5");
    }
}
