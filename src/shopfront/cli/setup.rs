use clap::{Parser, Subcommand};
use shopfront::filter::SortKey;
use shopfront::model::{Gender, ProductId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shopfront", bin_name = "shopfront", version)]
#[command(about = "Browse a catalog, fill a cart and price a checkout", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SHOPFRONT_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Listing bounds must survive the trip through a query string, so NaN and
/// infinities are refused up front.
fn finite_number(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("{} is not a finite number", raw)),
        Err(e) => Err(e.to_string()),
    }
}

/// Listing filters given as flags. They refine whatever `--url` sets.
#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// Query string of a listing link, e.g. "cat=men&size=M&sort=priceAsc"
    #[arg(long, value_name = "QUERY")]
    pub url: Option<String>,

    /// Reset every filter except a department fixed by --url
    #[arg(long)]
    pub clear: bool,

    /// Free-text search over name, brand, category and tags
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// all, men, women or kids
    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(long = "sub", value_delimiter = ',', value_name = "CATEGORY")]
    pub sub_categories: Vec<String>,

    #[arg(long = "size", value_delimiter = ',')]
    pub sizes: Vec<String>,

    #[arg(long = "color", value_delimiter = ',')]
    pub colors: Vec<String>,

    #[arg(long = "brand", value_delimiter = ',')]
    pub brands: Vec<String>,

    #[arg(long = "min", value_parser = finite_number)]
    pub price_min: Option<f64>,

    #[arg(long = "max", value_parser = finite_number)]
    pub price_max: Option<f64>,

    /// Minimum average rating
    #[arg(long, value_parser = finite_number)]
    pub rating: Option<f64>,

    /// Minimum discount percentage
    #[arg(long, value_parser = finite_number)]
    pub discount: Option<f64>,

    /// relevance, priceAsc, priceDesc, rating or new
    #[arg(short, long)]
    pub sort: Option<SortKey>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products matching filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show facet counts and price range
        #[arg(long)]
        facets: bool,
    },

    /// Show one product
    View { id: ProductId },

    /// Quick search suggestions
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Manage the cart (lists it when no action is given)
    Cart {
        #[command(subcommand)]
        action: Option<CartCommands>,
    },

    /// Delivery options for a postal code
    Shipping { postal_code: String },

    /// Price breakdown for the current cart
    Checkout {
        /// Coupon code to apply
        #[arg(long)]
        coupon: Option<String>,

        /// Postal code to check delivery against
        #[arg(long, alias = "zip")]
        pincode: Option<String>,

        /// Prefer express delivery
        #[arg(long)]
        express: bool,
    },

    /// Replace the catalog from a JSON file
    Import { file: PathBuf },

    /// Get or set configuration
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CartCommands {
    /// Cart lines and saved items
    #[command(alias = "ls")]
    List,

    /// Add a product
    Add {
        product_id: ProductId,

        #[arg(short = 'n', long, default_value_t = 1)]
        qty: u32,

        #[arg(short, long)]
        size: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },

    /// Set a line's quantity; 0 removes it
    Qty {
        /// Line number or id
        line: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },

    /// Remove lines
    #[command(alias = "remove")]
    Rm {
        #[arg(required = true, num_args = 1..)]
        lines: Vec<String>,
    },

    /// Empty the cart
    Clear,

    /// Move a line to the saved list
    Save { line: String },

    /// Move a saved item back to the cart
    Restore { saved: String },

    /// Drop a saved item
    Unsave { saved: String },
}
