use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::chips::applied_filters;
use crate::filter::facets::{self, FacetCount, Facets};
use crate::filter::query::to_query_string;
use crate::filter::sort::sorted;
use crate::filter::{AppliedFilter, FilterState, Predicate};
use crate::model::{Gender, Product};
use crate::store::DataStore;
use tracing::debug;

/// One rendering of the product listing.
#[derive(Debug, Clone)]
pub struct Listing {
    pub state: FilterState,
    /// Department fixed by the entry link, if any
    pub locked_gender: Option<Gender>,
    /// Matching products in display order
    pub products: Vec<Product>,
    pub facets: Facets,
    pub size_options: Vec<FacetCount>,
    pub chips: Vec<AppliedFilter>,
    /// Canonical query string for `state`
    pub query_string: String,
}

impl Listing {
    pub fn result_count(&self) -> usize {
        self.products.len()
    }
}

pub fn run<S: DataStore>(
    store: &S,
    state: &FilterState,
    locked_gender: Option<Gender>,
) -> Result<CmdResult> {
    // A lock only holds while the state still shows that department.
    let locked_gender = locked_gender.filter(|g| *g == state.gender);
    let catalog = store.list_products()?;
    let predicate = Predicate::new(state);

    let matching = catalog.iter().filter(|p| predicate.matches(p));
    let products: Vec<Product> = sorted(matching, state.sort, &state.query)
        .into_iter()
        .cloned()
        .collect();

    let facets = facets::extract(&catalog, state);
    let size_options = facets::size_options(&facets.sizes, state.gender);
    debug!(
        catalog = catalog.len(),
        results = products.len(),
        sort = %state.sort,
        "built listing"
    );

    let listing = Listing {
        state: state.clone(),
        locked_gender,
        products,
        facets,
        size_options,
        chips: applied_filters(state, locked_gender.is_some()),
        query_string: to_query_string(state),
    };

    let mut result = CmdResult::default();
    if listing.products.is_empty() && !catalog.is_empty() {
        result.add_message(CmdMessage::info(
            "No products match these filters. Try clearing some.",
        ));
    }
    Ok(result.with_listing(listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::query::from_query_string;
    use crate::filter::{Facet, Selection, SortKey};
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;

    fn ids(result: &CmdResult) -> Vec<u64> {
        result
            .listing
            .as_ref()
            .unwrap()
            .products
            .iter()
            .map(|p| p.id)
            .collect()
    }

    fn two_product_store() -> InMemoryStore {
        let mut a = Product::new(1, "Tee A", 500.0);
        a.gender = "men".into();
        a.brand = "A".into();
        let mut b = Product::new(2, "Tee B", 1500.0);
        b.gender = "women".into();
        b.brand = "B".into();
        InMemoryStore::with_products(vec![a, b])
    }

    #[test]
    fn gender_filter_keeps_matching_department() {
        let store = two_product_store();
        let state = FilterState {
            gender: Gender::Men,
            ..FilterState::default()
        };
        assert_eq!(ids(&run(&store, &state, None).unwrap()), [1]);
    }

    #[test]
    fn price_desc_orders_unfiltered_catalog() {
        let store = two_product_store();
        let state = FilterState {
            sort: SortKey::PriceDesc,
            ..FilterState::default()
        };
        assert_eq!(ids(&run(&store, &state, None).unwrap()), [2, 1]);
    }

    #[test]
    fn brand_facet_ignores_its_own_selection() {
        let store = two_product_store();
        let state = FilterState {
            brands: Selection::from_csv("A"),
            ..FilterState::default()
        };
        let result = run(&store, &state, None).unwrap();
        let listing = result.listing.unwrap();
        assert_eq!(listing.facets.count_of(Facet::Brand, "A"), 1);
        assert_eq!(listing.facets.count_of(Facet::Brand, "B"), 1);
        assert_eq!(listing.result_count(), 1);
    }

    #[test]
    fn listing_carries_canonical_query_string() {
        let store = StoreFixture::new().with_catalog().store;
        let state = from_query_string("size=M&cat=men&sort=priceAsc");
        let result = run(&store, &state, Some(Gender::Men)).unwrap();
        let listing = result.listing.unwrap();

        assert_eq!(listing.query_string, "cat=men&size=M&sort=priceAsc");
        assert_eq!(
            listing.products.iter().map(|p| p.id).collect::<Vec<_>>(),
            [2, 1, 6]
        );
        // Locked department shows no gender chip.
        assert_eq!(listing.chips, vec![AppliedFilter::Value(Facet::Size, "M".into())]);
    }

    #[test]
    fn switching_away_from_locked_department_shows_gender_chip() {
        let store = StoreFixture::new().with_catalog().store;
        let mut state = from_query_string("cat=men");
        state.set_gender(Gender::Women);

        let listing = run(&store, &state, Some(Gender::Men)).unwrap().listing.unwrap();

        assert_eq!(listing.locked_gender, None);
        assert_eq!(listing.chips, vec![AppliedFilter::Gender(Gender::Women)]);
        assert_eq!(
            listing.products.iter().map(|p| p.id).collect::<Vec<_>>(),
            [4, 3]
        );
    }

    #[test]
    fn size_options_follow_department() {
        let store = StoreFixture::new().with_catalog().store;
        let state = FilterState {
            gender: Gender::Kids,
            ..FilterState::default()
        };
        let listing = run(&store, &state, None).unwrap().listing.unwrap();
        let sizes: Vec<&str> = listing.size_options.iter().map(|fc| fc.value.as_str()).collect();
        assert_eq!(sizes, ["3-4Y", "5-6Y"]);
    }

    #[test]
    fn empty_result_adds_hint() {
        let store = StoreFixture::new().with_catalog().store;
        let state = FilterState {
            query: "no such thing".into(),
            ..FilterState::default()
        };
        let result = run(&store, &state, None).unwrap();
        assert!(ids(&result).is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn empty_catalog_yields_empty_listing() {
        let store = InMemoryStore::new();
        let result = run(&store, &FilterState::default(), None).unwrap();
        let listing = result.listing.unwrap();
        assert!(listing.products.is_empty());
        assert_eq!(listing.facets.price_range.min, 0.0);
        assert!(result.messages.is_empty());
    }
}
