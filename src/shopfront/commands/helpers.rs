use crate::error::{Result, ShopError};
use crate::model::CartItem;
use uuid::Uuid;

/// Shortest id prefix accepted as a line selector.
const MIN_PREFIX: usize = 4;

/// Resolves a line selector against a list of lines.
///
/// A selector is either the 1-based position of the line as listed or its id
/// (full, or a unique prefix of at least four characters).
pub fn resolve_line(items: &[CartItem], selector: &str) -> Result<Uuid> {
    let selector = selector.trim();

    if let Ok(position) = selector.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .map(|it| it.id)
            .ok_or_else(|| ShopError::Api(format!("No line at position {}", selector)));
    }

    if let Ok(id) = Uuid::parse_str(selector) {
        return Ok(id);
    }

    if selector.len() < MIN_PREFIX {
        return Err(ShopError::Api(format!("Invalid line selector: {}", selector)));
    }
    let prefix = selector.to_lowercase();
    let mut found = items
        .iter()
        .filter(|it| it.id.to_string().starts_with(&prefix));
    match (found.next(), found.next()) {
        (Some(item), None) => Ok(item.id),
        (Some(_), Some(_)) => Err(ShopError::Api(format!("Ambiguous line id: {}", selector))),
        (None, _) => Err(ShopError::Api(format!("No line matches {}", selector))),
    }
}

pub fn resolve_lines<I: AsRef<str>>(items: &[CartItem], selectors: &[I]) -> Result<Vec<Uuid>> {
    selectors
        .iter()
        .map(|s| resolve_line(items, s.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewCartItem, Product};

    fn lines() -> Vec<CartItem> {
        (1..=3)
            .map(|id| NewCartItem::from_product(&Product::new(id, "Tee", 100.0)).into_item())
            .collect()
    }

    #[test]
    fn resolves_positions() {
        let items = lines();
        assert_eq!(resolve_line(&items, "1").unwrap(), items[0].id);
        assert_eq!(resolve_line(&items, " 3 ").unwrap(), items[2].id);
        assert!(resolve_line(&items, "0").is_err());
        assert!(resolve_line(&items, "4").is_err());
    }

    #[test]
    fn resolves_ids_and_prefixes() {
        let items = lines();
        let full = items[1].id.to_string();
        assert_eq!(resolve_line(&items, &full).unwrap(), items[1].id);

        // Long prefixes are unique among three random ids.
        assert_eq!(resolve_line(&items, &full[..13]).unwrap(), items[1].id);
    }

    #[test]
    fn rejects_short_or_unknown_selectors() {
        let items = lines();
        assert!(resolve_line(&items, "ab").is_err());
        assert!(resolve_line(&items, "zzzz-not-an-id").is_err());
    }

    #[test]
    fn resolves_many() {
        let items = lines();
        let ids = resolve_lines(&items, &["3", "1"]).unwrap();
        assert_eq!(ids, vec![items[2].id, items[0].id]);
    }
}
