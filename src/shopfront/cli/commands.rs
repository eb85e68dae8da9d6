use super::init_logging;
use super::print::{
    print_cart, print_checkout, print_config, print_detail, print_listing, print_messages,
    print_products, print_shipping,
};
use super::setup::{CartCommands, Cli, Commands, FilterArgs};
use clap::Parser;
use directories::ProjectDirs;
use shopfront::api::ShopApi;
use shopfront::commands::checkout::CheckoutRequest;
use shopfront::commands::config::ConfigAction;
use shopfront::commands::search::listing_link;
use shopfront::commands::{ShippingId, ShopPaths};
use shopfront::config::ShopConfig;
use shopfront::error::{Result, ShopError};
use shopfront::filter::{Facet, FilterState};
use shopfront::model::ProductId;
use shopfront::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOME_ENV: &str = "SHOPFRONT_HOME";

struct AppContext {
    api: ShopApi<FileStore>,
    config: ShopConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { filters, facets }) => handle_list(&ctx, filters, facets),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Search { term }) => handle_search(&ctx, &term.join(" ")),
        Some(Commands::Cart { action }) => match action {
            None | Some(CartCommands::List) => handle_cart(&ctx),
            Some(CartCommands::Add {
                product_id,
                qty,
                size,
                color,
            }) => handle_cart_add(&mut ctx, product_id, qty, size, color),
            Some(CartCommands::Qty { line, qty }) => handle_cart_qty(&mut ctx, &line, qty),
            Some(CartCommands::Rm { lines }) => handle_cart_rm(&mut ctx, lines),
            Some(CartCommands::Clear) => handle_cart_clear(&mut ctx),
            Some(CartCommands::Save { line }) => handle_save(&mut ctx, &line),
            Some(CartCommands::Restore { saved }) => handle_restore(&mut ctx, &saved),
            Some(CartCommands::Unsave { saved }) => handle_unsave(&mut ctx, &saved),
        },
        Some(Commands::Shipping { postal_code }) => handle_shipping(&ctx, &postal_code),
        Some(Commands::Checkout {
            coupon,
            pincode,
            express,
        }) => handle_checkout(&ctx, coupon, pincode, express),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, FilterArgs::default(), false),
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "shopfront", "shopfront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShopError::Api("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    debug!(data_dir = %dir.display(), "opening store");

    let paths = ShopPaths::new(dir.clone());
    let config = paths.load_config()?;
    let api = ShopApi::new(FileStore::new(dir), paths);
    Ok(AppContext { api, config })
}

/// Applies flag filters on top of the state read from `--url`.
fn apply_filters(state: &mut FilterState, args: &FilterArgs) {
    if let Some(gender) = args.gender {
        state.set_gender(gender);
    }
    if let Some(q) = &args.search {
        state.query = q.trim().to_string();
    }
    for (facet, values) in [
        (Facet::SubCategory, &args.sub_categories),
        (Facet::Size, &args.sizes),
        (Facet::Color, &args.colors),
        (Facet::Brand, &args.brands),
    ] {
        let selection = state.selection_mut(facet);
        for value in values {
            selection.insert(value);
        }
    }
    if args.price_min.is_some() {
        state.price_min = args.price_min;
    }
    if args.price_max.is_some() {
        state.price_max = args.price_max;
    }
    if let Some(rating) = args.rating {
        state.rating_floor = rating;
    }
    if let Some(discount) = args.discount {
        state.discount_floor = discount;
    }
    if let Some(sort) = args.sort {
        state.sort = sort;
    }
}

fn handle_list(ctx: &AppContext, args: FilterArgs, show_facets: bool) -> Result<()> {
    let url = args.url.clone().unwrap_or_default();
    let result = ctx.api.refine_url(&url, |state, locked| {
        if args.clear {
            *state = FilterState::cleared(locked);
        }
        apply_filters(state, &args);
    })?;
    if let Some(listing) = &result.listing {
        print_listing(listing, show_facets, &ctx.config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: ProductId) -> Result<()> {
    let result = ctx.api.view_product(id)?;
    if let Some(detail) = &result.detail {
        print_detail(detail, &ctx.config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: &str) -> Result<()> {
    let result = ctx.api.search_suggestions(term)?;
    print_products(&result.products, &ctx.config);
    if !result.products.is_empty() {
        println!("\nAll results: {}", listing_link(term));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_cart(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.cart()?;
    let saved = ctx.api.saved()?;
    if let Some(cart) = &result.cart {
        print_cart(cart, &saved.saved, &ctx.config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_cart_add(
    ctx: &mut AppContext,
    product_id: ProductId,
    qty: u32,
    size: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let result = ctx.api.add_to_cart(product_id, qty, size, color)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cart_qty(ctx: &mut AppContext, line: &str, qty: i64) -> Result<()> {
    let result = ctx.api.set_cart_qty(line, qty)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cart_rm(ctx: &mut AppContext, lines: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_from_cart(&lines)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_cart_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_cart()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(ctx: &mut AppContext, line: &str) -> Result<()> {
    let result = ctx.api.save_for_later(line)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, saved: &str) -> Result<()> {
    let result = ctx.api.move_to_cart(saved)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unsave(ctx: &mut AppContext, saved: &str) -> Result<()> {
    let result = ctx.api.remove_saved(saved)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_shipping(ctx: &AppContext, postal_code: &str) -> Result<()> {
    let result = ctx.api.shipping_options(postal_code)?;
    if let Some(quote) = &result.shipping {
        print_shipping(quote, &ctx.config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_checkout(
    ctx: &AppContext,
    coupon: Option<String>,
    pincode: Option<String>,
    express: bool,
) -> Result<()> {
    let request = CheckoutRequest {
        coupon,
        postal_code: pincode,
        shipping: express.then_some(ShippingId::Express),
    };
    let result = ctx.api.checkout(&request)?;
    if let Some(summary) = &result.checkout {
        print_checkout(summary, &ctx.config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let result = ctx.api.import_catalog(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
