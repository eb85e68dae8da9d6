use crate::commands::cart::{cart_view, merge_line};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShopError};
use crate::model::{CartItem, NewCartItem};
use crate::store::DataStore;
use uuid::Uuid;

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_saved(store.list_saved()?))
}

/// Moves a cart line to the saved list, keeping its id.
pub fn save_for_later<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let item = store
        .list_cart()?
        .into_iter()
        .find(|it| it.id == *id)
        .ok_or(ShopError::CartItemNotFound(*id))?;

    store.save_saved_item(&item)?;
    store.delete_cart_item(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Saved {} for later", item.name)));
    Ok(result
        .with_affected_items(vec![item])
        .with_saved(store.list_saved()?)
        .with_cart(cart_view(store)?))
}

/// Puts a saved line back in the cart, merging with a matching cart line.
pub fn move_to_cart<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let saved = find_saved(store, id)?;

    let request = NewCartItem {
        product_id: saved.product_id,
        name: saved.name.clone(),
        price: saved.price,
        mrp: saved.mrp,
        qty: saved.qty,
        size: saved.size.clone(),
        color: saved.color.clone(),
    };
    let line = merge_line(store, request)?;
    store.delete_saved_item(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Moved {} to cart", saved.name)));
    Ok(result
        .with_affected_items(vec![line])
        .with_saved(store.list_saved()?)
        .with_cart(cart_view(store)?))
}

pub fn remove<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let saved = find_saved(store, id)?;
    store.delete_saved_item(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} from saved items",
        saved.name
    )));
    Ok(result
        .with_affected_items(vec![saved])
        .with_saved(store.list_saved()?))
}

fn find_saved<S: DataStore>(store: &S, id: &Uuid) -> Result<CartItem> {
    store
        .list_saved()?
        .into_iter()
        .find(|it| it.id == *id)
        .ok_or(ShopError::SavedItemNotFound(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart;
    use crate::store::memory::InMemoryStore;
    use crate::store::memory::fixtures::StoreFixture;

    fn store_with_lines() -> InMemoryStore {
        StoreFixture::new()
            .with_catalog()
            .with_cart_line(1, 1)
            .with_cart_line(4, 2)
            .store
    }

    #[test]
    fn save_moves_line_out_of_cart() {
        let mut store = store_with_lines();
        let line = store.list_cart().unwrap()[1].clone();

        let result = save_for_later(&mut store, &line.id).unwrap();

        assert_eq!(result.cart.unwrap().count, 1);
        assert_eq!(result.saved.len(), 1);
        assert_eq!(result.saved[0].id, line.id);
        assert_eq!(result.saved[0].qty, 2);
    }

    #[test]
    fn move_back_restores_line() {
        let mut store = store_with_lines();
        let line = store.list_cart().unwrap()[0].clone();
        save_for_later(&mut store, &line.id).unwrap();

        let result = move_to_cart(&mut store, &line.id).unwrap();

        assert!(result.saved.is_empty());
        let cart = result.cart.unwrap();
        assert_eq!(cart.items.len(), 2);
        assert!(cart.items.iter().any(|it| it.product_id == 1));
    }

    #[test]
    fn move_back_merges_with_matching_line() {
        let mut store = store_with_lines();
        let line = store.list_cart().unwrap()[0].clone();
        save_for_later(&mut store, &line.id).unwrap();
        cart::add(&mut store, 1, 1, None, None).unwrap();

        move_to_cart(&mut store, &line.id).unwrap();

        let lines: Vec<_> = store
            .list_cart()
            .unwrap()
            .into_iter()
            .filter(|it| it.product_id == 1)
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 2);
    }

    #[test]
    fn move_back_onto_full_line_saturates() {
        let mut store = store_with_lines();
        let line = store.list_cart().unwrap()[0].clone();
        save_for_later(&mut store, &line.id).unwrap();
        cart::add(&mut store, 1, u32::MAX, None, None).unwrap();

        move_to_cart(&mut store, &line.id).unwrap();

        let full = store
            .list_cart()
            .unwrap()
            .into_iter()
            .find(|it| it.product_id == 1)
            .unwrap();
        assert_eq!(full.qty, u32::MAX);
    }

    #[test]
    fn remove_saved_item() {
        let mut store = store_with_lines();
        let line = store.list_cart().unwrap()[0].clone();
        save_for_later(&mut store, &line.id).unwrap();

        remove(&mut store, &line.id).unwrap();
        assert!(list(&store).unwrap().saved.is_empty());
        assert!(matches!(
            remove(&mut store, &line.id),
            Err(ShopError::SavedItemNotFound(_))
        ));
    }

    #[test]
    fn saving_unknown_line_fails() {
        let mut store = store_with_lines();
        assert!(matches!(
            save_for_later(&mut store, &Uuid::new_v4()),
            Err(ShopError::CartItemNotFound(_))
        ));
    }
}
