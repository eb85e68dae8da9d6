//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all storefront operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (query strings into filter state, line selectors into ids)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and `filter/*.rs`
//! - **I/O operations**: No stdout, stderr, or terminal formatting
//!
//! ## Generic Over DataStore
//!
//! `ShopApi<S: DataStore>` is generic over the storage backend:
//! - Production: `ShopApi<FileStore>`
//! - Testing: `ShopApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests check that each method reaches the right command with the right
//! arguments. Command behavior is tested in the command modules.

use crate::commands::checkout::CheckoutRequest;
use crate::commands::config::ConfigAction;
use crate::commands::{self, helpers};
use crate::error::Result;
use crate::filter::query::from_query_string;
use crate::filter::FilterState;
use crate::model::{Gender, ProductId};
use crate::store::DataStore;
use std::path::Path;

/// The main API facade for storefront operations.
pub struct ShopApi<S: DataStore> {
    store: S,
    paths: commands::ShopPaths,
}

impl<S: DataStore> ShopApi<S> {
    pub fn new(store: S, paths: commands::ShopPaths) -> Self {
        Self { store, paths }
    }

    pub fn paths(&self) -> &commands::ShopPaths {
        &self.paths
    }

    /// Listing for an explicit state with no department lock.
    pub fn browse(&self, state: &FilterState) -> Result<commands::CmdResult> {
        commands::browse::run(&self.store, state, None)
    }

    /// Listing entered through a link. A department in the link locks it.
    pub fn browse_url(&self, query: &str) -> Result<commands::CmdResult> {
        let state = from_query_string(query);
        let locked = locked_gender(&state);
        commands::browse::run(&self.store, &state, locked)
    }

    /// Runs `refine` on the state read from an entry link, keeping the
    /// department lock the link established.
    pub fn refine_url(
        &self,
        query: &str,
        refine: impl FnOnce(&mut FilterState, Option<Gender>),
    ) -> Result<commands::CmdResult> {
        let mut state = from_query_string(query);
        let locked = locked_gender(&state);
        refine(&mut state, locked);
        commands::browse::run(&self.store, &state, locked)
    }

    pub fn search_suggestions(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn view_product(&self, id: ProductId) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        qty: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::cart::add(&mut self.store, product_id, qty, size, color)
    }

    pub fn set_cart_qty(&mut self, selector: &str, qty: i64) -> Result<commands::CmdResult> {
        let id = helpers::resolve_line(&self.store.list_cart()?, selector)?;
        commands::cart::set_qty(&mut self.store, &id, qty)
    }

    pub fn remove_from_cart<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
    ) -> Result<commands::CmdResult> {
        let ids = helpers::resolve_lines(&self.store.list_cart()?, selectors)?;
        commands::cart::remove(&mut self.store, &ids)
    }

    pub fn cart(&self) -> Result<commands::CmdResult> {
        commands::cart::list(&self.store)
    }

    pub fn clear_cart(&mut self) -> Result<commands::CmdResult> {
        commands::cart::clear(&mut self.store)
    }

    pub fn saved(&self) -> Result<commands::CmdResult> {
        commands::saved::list(&self.store)
    }

    pub fn save_for_later(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = helpers::resolve_line(&self.store.list_cart()?, selector)?;
        commands::saved::save_for_later(&mut self.store, &id)
    }

    pub fn move_to_cart(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = helpers::resolve_line(&self.store.list_saved()?, selector)?;
        commands::saved::move_to_cart(&mut self.store, &id)
    }

    pub fn remove_saved(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = helpers::resolve_line(&self.store.list_saved()?, selector)?;
        commands::saved::remove(&mut self.store, &id)
    }

    pub fn shipping_options(&self, postal_code: &str) -> Result<commands::CmdResult> {
        let config = self.paths.load_config()?;
        commands::shipping::run(&config, postal_code)
    }

    pub fn checkout(&self, request: &CheckoutRequest) -> Result<commands::CmdResult> {
        let config = self.paths.load_config()?;
        commands::checkout::run(&self.store, &config, request)
    }

    pub fn import_catalog(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

fn locked_gender(state: &FilterState) -> Option<Gender> {
    (state.gender != Gender::All).then_some(state.gender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ShippingId;
    use crate::filter::AppliedFilter;
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::TempDir;

    fn make_api(store: InMemoryStore) -> (ShopApi<InMemoryStore>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let paths = commands::ShopPaths::new(dir.path().to_path_buf());
        (ShopApi::new(store, paths), dir)
    }

    fn catalog_api() -> (ShopApi<InMemoryStore>, TempDir) {
        make_api(StoreFixture::new().with_catalog().store)
    }

    #[test]
    fn browse_url_locks_department() {
        let (api, _dir) = catalog_api();
        let listing = api.browse_url("?cat=women&brand=Nike").unwrap().listing.unwrap();

        assert_eq!(listing.locked_gender, Some(Gender::Women));
        assert_eq!(listing.products.len(), 1);
        assert!(!listing.chips.iter().any(|c| matches!(c, AppliedFilter::Gender(_))));
    }

    #[test]
    fn browse_url_without_department_is_unlocked() {
        let (api, _dir) = catalog_api();
        let listing = api.browse_url("search=tee").unwrap().listing.unwrap();
        assert_eq!(listing.locked_gender, None);
        assert_eq!(listing.products.len(), 3);
    }

    #[test]
    fn clearing_keeps_locked_department() {
        let (api, _dir) = catalog_api();
        let listing = api
            .refine_url("cat=men&size=M&sort=priceDesc", |state, locked| {
                *state = FilterState::cleared(locked);
            })
            .unwrap()
            .listing
            .unwrap();

        assert_eq!(listing.state.gender, Gender::Men);
        assert_eq!(listing.query_string, "cat=men");
        assert_eq!(listing.products.len(), 3);
    }

    #[test]
    fn cart_selectors_resolve_positions() {
        let (mut api, _dir) = catalog_api();
        api.add_to_cart(1, 1, Some("M".into()), None).unwrap();
        api.add_to_cart(2, 1, Some("S".into()), None).unwrap();

        api.set_cart_qty("2", 3).unwrap();
        let cart = api.cart().unwrap().cart.unwrap();
        assert_eq!(cart.items[1].qty, 3);
        assert_eq!(cart.count, 4);

        api.remove_from_cart(&["1"]).unwrap();
        let cart = api.cart().unwrap().cart.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, 2);
    }

    #[test]
    fn saved_round_trip_through_api() {
        let (mut api, _dir) = catalog_api();
        api.add_to_cart(3, 1, Some("S".into()), Some("Red".into())).unwrap();

        api.save_for_later("1").unwrap();
        assert_eq!(api.saved().unwrap().saved.len(), 1);
        assert!(api.cart().unwrap().cart.unwrap().is_empty());

        api.move_to_cart("1").unwrap();
        assert!(api.saved().unwrap().saved.is_empty());
        assert_eq!(api.cart().unwrap().cart.unwrap().count, 1);
    }

    #[test]
    fn checkout_reads_config_from_data_dir() {
        let (mut api, _dir) = catalog_api();
        api.config(ConfigAction::Set("platform-fee".into(), "0".into()))
            .unwrap();
        api.add_to_cart(5, 1, None, None).unwrap();

        let summary = api.checkout(&CheckoutRequest::default()).unwrap().checkout.unwrap();
        assert_eq!(summary.price.platform_fee, 0.0);
        assert_eq!(summary.price.grand_total, 399.0 + 49.0);
    }

    #[test]
    fn shipping_options_dispatch() {
        let (api, _dir) = catalog_api();
        let quote = api.shipping_options("110001").unwrap().shipping.unwrap();
        assert_eq!(quote.selected, Some(ShippingId::Standard));
    }

    #[test]
    fn search_and_view_dispatch() {
        let (api, _dir) = catalog_api();
        assert_eq!(api.search_suggestions("jacket").unwrap().products.len(), 1);
        assert_eq!(
            api.view_product(6).unwrap().detail.unwrap().product.brand,
            "Levis"
        );
    }
}
