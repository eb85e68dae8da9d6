use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Product, ProductId};
use crate::store::DataStore;

/// Most "you may also like" products on a detail page.
pub const MAX_ALSO_LIKE: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct SizeStock {
    pub size: String,
    pub stock: u32,
}

impl SizeStock {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub discount: f64,
    /// Every listed size with its units on hand, in listing order
    pub sizes: Vec<SizeStock>,
    pub default_color: Option<String>,
    /// Images to page through; the thumbnail when there are none
    pub gallery: Vec<String>,
    pub also_like: Vec<Product>,
}

impl ProductDetail {
    pub fn can_add(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s.size == size && s.in_stock())
    }
}

pub fn run<S: DataStore>(store: &S, id: ProductId) -> Result<CmdResult> {
    let product = store.get_product(id)?;

    let also_like = store
        .list_products()?
        .into_iter()
        .filter(|p| {
            p.id != product.id && (p.category == product.category || p.brand == product.brand)
        })
        .take(MAX_ALSO_LIKE)
        .collect();

    let sizes = product
        .sizes
        .iter()
        .map(|s| SizeStock {
            size: s.clone(),
            stock: product.stock_for(s),
        })
        .collect();

    let gallery = if product.images.is_empty() {
        vec![product.thumbnail.clone()]
    } else {
        product.images.clone()
    };

    let detail = ProductDetail {
        discount: product.effective_discount(),
        default_color: product.colors.first().map(|c| c.name.clone()),
        sizes,
        gallery,
        also_like,
        product,
    };
    Ok(CmdResult::default().with_detail(detail))
}
