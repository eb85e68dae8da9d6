use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShopError};
use crate::model::{CartItem, NewCartItem, ProductId};
use crate::store::DataStore;
use tracing::{debug, warn};
use uuid::Uuid;

/// The cart as the mini-cart and cart page show it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub items: Vec<CartItem>,
    /// Total units across lines
    pub count: u64,
    /// Sum of selling price times quantity
    pub subtotal: f64,
}

impl CartView {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let count = items.iter().map(|it| u64::from(it.qty)).sum();
        let subtotal = items.iter().map(CartItem::line_total).sum();
        Self {
            items,
            count,
            subtotal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn cart_view<S: DataStore>(store: &S) -> Result<CartView> {
    Ok(CartView::from_items(store.list_cart()?))
}

/// Adds `request.qty` to the matching line, or opens a new one. Line
/// quantities saturate at `u32::MAX`.
pub(crate) fn merge_line<S: DataStore>(store: &mut S, request: NewCartItem) -> Result<CartItem> {
    let existing = store
        .list_cart()?
        .into_iter()
        .find(|it| request.same_line_as(it));

    let item = match existing {
        Some(mut line) => {
            line.qty = line.qty.saturating_add(request.qty);
            debug!(line = %line.id, qty = line.qty, "merged into existing cart line");
            line
        }
        None => request.into_item(),
    };
    store.save_cart_item(&item)?;
    Ok(item)
}

pub fn add<S: DataStore>(
    store: &mut S,
    product_id: ProductId,
    qty: u32,
    size: Option<String>,
    color: Option<String>,
) -> Result<CmdResult> {
    let product = store.get_product(product_id)?;

    if let Some(size) = size
        .as_ref()
        .filter(|s| !product.stock.is_empty() && product.stock_for(s) == 0)
    {
        return Err(ShopError::OutOfStock {
            product: product_id,
            size: size.clone(),
        });
    }

    let mut request = NewCartItem::from_product(&product).with_qty(qty.max(1));
    if let Some(size) = size {
        request = request.with_size(size);
    }
    if let Some(color) = color {
        request = request.with_color(color);
    }

    let item = merge_line(store, request)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} to cart (qty {})",
        item.name, item.qty
    )));
    Ok(result
        .with_affected_items(vec![item])
        .with_cart(cart_view(store)?))
}

/// Sets a line's quantity. Zero or less removes the line.
pub fn set_qty<S: DataStore>(store: &mut S, id: &Uuid, qty: i64) -> Result<CmdResult> {
    if qty <= 0 {
        return remove(store, &[*id]);
    }

    let mut item = store
        .list_cart()?
        .into_iter()
        .find(|it| it.id == *id)
        .ok_or(ShopError::CartItemNotFound(*id))?;
    item.qty = u32::try_from(qty).unwrap_or(u32::MAX);
    store.save_cart_item(&item)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} quantity set to {}",
        item.name, item.qty
    )));
    Ok(result
        .with_affected_items(vec![item])
        .with_cart(cart_view(store)?))
}

pub fn remove<S: DataStore>(store: &mut S, ids: &[Uuid]) -> Result<CmdResult> {
    let cart = store.list_cart()?;
    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        let item = cart
            .iter()
            .find(|it| it.id == *id)
            .ok_or(ShopError::CartItemNotFound(*id))?;
        store.delete_cart_item(id)?;
        removed.push(item.clone());
    }

    let mut result = CmdResult::default();
    for item in &removed {
        result.add_message(CmdMessage::success(format!("Removed {} from cart", item.name)));
    }
    Ok(result
        .with_affected_items(removed)
        .with_cart(cart_view(store)?))
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_cart(cart_view(store)?))
}

/// Deletes every line. A line that fails to delete is reported and skipped
/// so one bad line never blocks emptying the rest.
pub fn clear<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut cleared = 0;

    for item in store.list_cart()? {
        match store.delete_cart_item(&item.id) {
            Ok(()) => cleared += 1,
            Err(e) => {
                warn!(line = %item.id, error = %e, "failed to delete cart line");
                result.add_message(CmdMessage::warning(format!(
                    "Could not remove {}: {}",
                    item.name, e
                )));
            }
        }
    }

    result.add_message(CmdMessage::success(format!("Cleared {} cart line(s)", cleared)));
    Ok(result.with_cart(cart_view(store)?))
}
