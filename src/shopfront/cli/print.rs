use chrono::{DateTime, Utc};
use colored::Colorize;
use shopfront::commands::{
    CartView, CheckoutSummary, CmdMessage, Listing, MessageLevel, ProductDetail, ShippingQuote,
};
use shopfront::config::{CouponKind, SETTABLE_KEYS, ShopConfig};
use shopfront::filter::{Facet, FacetCount};
use shopfront::model::{CartItem, Product};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const NAME_WIDTH: usize = 40;
const TIME_WIDTH: usize = 14;
const BAR_WIDTH: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_listing(listing: &Listing, show_facets: bool, config: &ShopConfig) {
    let heading = match listing.locked_gender {
        Some(g) => format!("{} products for {}", listing.result_count(), g),
        None => format!("{} products", listing.result_count()),
    };
    println!("{}  {}", heading.bold(), listing.state.sort.label().dimmed());
    if !listing.query_string.is_empty() {
        println!("{}", format!("?{}", listing.query_string).dimmed());
    }

    if !listing.chips.is_empty() {
        let chips: Vec<String> = listing
            .chips
            .iter()
            .map(|c| c.label(&config.currency_symbol))
            .collect();
        println!("Applied: {}", chips.join(" | ").cyan());
    }

    if show_facets {
        println!();
        print_facet("Category", &listing.facets.sub_categories);
        print_facet("Size", &listing.size_options);
        print_facet(Facet::Color.label(), &listing.facets.colors);
        print_facet(Facet::Brand.label(), &listing.facets.brands);
        let range = listing.facets.price_range;
        println!(
            "{}{} - {}",
            format!("{:<10}", "Price").bold(),
            format_price(&config.currency_symbol, range.min),
            format_price(&config.currency_symbol, range.max)
        );
    }

    println!();
    print_products(&listing.products, config);
}

fn print_facet(label: &str, counts: &[FacetCount]) {
    if counts.is_empty() {
        return;
    }
    let values: Vec<String> = counts
        .iter()
        .map(|fc| format!("{} ({})", fc.value, fc.count))
        .collect();
    println!("{}{}", format!("{:<10}", label).bold(), values.join(", "));
}

pub(super) fn print_products(products: &[Product], config: &ShopConfig) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for p in products {
        let id = format!("{:>4}. ", p.id);
        let name = pad_to_width(&truncate_to_width(&p.name, NAME_WIDTH), NAME_WIDTH);
        let brand = pad_to_width(&truncate_to_width(&p.brand, 14), 14);

        let mut price = format_price(&config.currency_symbol, p.price).bold().to_string();
        if let Some(mrp) = p.mrp.filter(|m| *m > p.price) {
            price.push(' ');
            price.push_str(
                &format_price(&config.currency_symbol, mrp)
                    .dimmed()
                    .strikethrough()
                    .to_string(),
            );
        }
        let discount = p.effective_discount();
        let off = if discount > 0.0 {
            format!(" {}% off", discount).green().to_string()
        } else {
            String::new()
        };
        let rating = format!("\u{2605}{:.1} ({})", p.rating.avg, p.rating.count).dimmed();

        println!("{}{} {} {}{}  {}", id.yellow(), name, brand, price, off, rating);
    }
}

pub(super) fn print_detail(detail: &ProductDetail, config: &ShopConfig) {
    let p = &detail.product;
    println!("{} {}", format!("#{}", p.id).yellow(), p.name.bold());
    println!("{}", p.brand.dimmed());

    let mut price_line = format_price(&config.currency_symbol, p.price).bold().to_string();
    if let Some(mrp) = p.mrp.filter(|m| *m > p.price) {
        price_line.push_str(&format!(
            "  {}",
            format_price(&config.currency_symbol, mrp).dimmed().strikethrough()
        ));
    }
    if detail.discount > 0.0 {
        price_line.push_str(&format!("  {}", format!("{}% OFF", detail.discount).green()));
    }
    println!("{}", price_line);

    if !p.colors.is_empty() {
        let colors: Vec<String> = p
            .colors
            .iter()
            .map(|c| {
                if Some(&c.name) == detail.default_color.as_ref() {
                    format!("[{}]", c.name)
                } else {
                    c.name.clone()
                }
            })
            .collect();
        println!("{}{}", format!("{:<8}", "Color").bold(), colors.join("  "));
    }

    if !detail.sizes.is_empty() {
        let sizes: Vec<String> = detail
            .sizes
            .iter()
            .map(|s| {
                if s.in_stock() {
                    format!("{} ({} left)", s.size, s.stock)
                } else {
                    format!("{} (sold out)", s.size).dimmed().to_string()
                }
            })
            .collect();
        println!("{}{}", format!("{:<8}", "Size").bold(), sizes.join("  "));
    }

    println!(
        "{}\u{2605}{:.1} from {} ratings",
        format!("{:<8}", "Rating").bold(),
        p.rating.avg,
        p.rating.count
    );

    if !detail.also_like.is_empty() {
        println!("\n{}", "You may also like".bold());
        print_products(&detail.also_like, config);
    }
}

fn variant(item: &CartItem) -> String {
    match (&item.size, &item.color) {
        (Some(s), Some(c)) => format!("{} / {}", s, c),
        (Some(s), None) => s.clone(),
        (None, Some(c)) => c.clone(),
        (None, None) => String::new(),
    }
}

fn print_lines(items: &[CartItem], config: &ShopConfig) {
    for (i, item) in items.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let label = if item.size.is_some() || item.color.is_some() {
            format!("{} ({})", item.name, variant(item))
        } else {
            item.name.clone()
        };
        let amount = format!(
            "{} x {} = {}",
            item.qty,
            format_price(&config.currency_symbol, item.price),
            format_price(&config.currency_symbol, item.line_total())
        );
        let time_ago = format_time_ago(item.added_at);

        let fixed = idx.width() + amount.width() + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let label = pad_to_width(&truncate_to_width(&label, available), available);

        println!(
            "{}{} {} {}",
            idx.yellow(),
            label,
            amount,
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_cart(cart: &CartView, saved: &[CartItem], config: &ShopConfig) {
    if cart.is_empty() {
        println!("Your cart is empty.");
    } else {
        print_lines(&cart.items, config);
        println!(
            "{} item(s), subtotal {}",
            cart.count,
            format_price(&config.currency_symbol, cart.subtotal).bold()
        );
    }

    if !saved.is_empty() {
        println!("\n{}", "Saved for later".bold());
        print_lines(saved, config);
    }
}

pub(super) fn print_shipping(quote: &ShippingQuote, config: &ShopConfig) {
    println!("Delivery options for {}", quote.postal_code.bold());
    for option in &quote.options {
        let marker = if Some(option.id) == quote.selected {
            "\u{25cf}"
        } else {
            "\u{25cb}"
        };
        let line = format!(
            "{} {:<10}{:<12}{}",
            marker,
            option.label,
            option.eta,
            format_price(&config.currency_symbol, option.price)
        );
        if option.available {
            println!("  {}", line);
        } else {
            println!("  {} {}", line.dimmed(), "(unavailable)".red());
        }
    }
}

fn price_row(label: &str, value: String) {
    let padding = 32usize.saturating_sub(label.width() + value.width());
    println!("  {}{}{}", label, " ".repeat(padding), value);
}

pub(super) fn print_checkout(summary: &CheckoutSummary, config: &ShopConfig) {
    let cur = &config.currency_symbol;
    let price = &summary.price;

    if summary.cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("{}", "PRICE DETAILS".bold());
    price_row("Total MRP", format_price(cur, price.total_mrp));
    price_row(
        "Discount on MRP",
        format!("- {}", format_price(cur, price.discount_on_mrp))
            .green()
            .to_string(),
    );
    let coupon = match &summary.coupon {
        Some(c) => format!("- {} ({})", format_price(cur, c.discount), c.code)
            .green()
            .to_string(),
        None => "Apply Coupon".magenta().to_string(),
    };
    price_row("Coupon Discount", coupon);
    let shipping = match &summary.shipping {
        Some(option) if price.shipping > 0.0 => {
            format!("{} ({})", format_price(cur, price.shipping), option.label)
        }
        Some(option) => format!("Free ({})", option.label),
        None => "Free".to_string(),
    };
    price_row("Shipping", shipping);
    price_row("Platform Fee", format_price(cur, price.platform_fee));
    println!("  {}", "-".repeat(32));
    price_row(
        "Total Amount",
        format_price(cur, price.grand_total).bold().to_string(),
    );

    let progress = &summary.progress;
    let filled = BAR_WIDTH * progress.pct as usize / 100;
    let bar = format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_WIDTH - filled)
    );
    println!();
    if progress.unlocked {
        println!("Free Express shipping {} {}", bar.green(), "Unlocked".green());
    } else {
        println!("Free Express shipping {} {}%", bar, progress.pct);
        println!(
            "{}",
            format!(
                "Add {} more to get Free Express.",
                format_price(cur, progress.remaining)
            )
            .dimmed()
        );
    }
}

pub(super) fn print_config(config: &ShopConfig) {
    for key in SETTABLE_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
    if !config.coupons.is_empty() {
        println!("coupons:");
        for coupon in &config.coupons {
            let kind = match coupon.kind {
                CouponKind::Percent(pct) => format!("{}% off", pct),
                CouponKind::Flat(amount) => format!("{} off", format_price(&config.currency_symbol, amount)),
            };
            let mut line = format!("  {:<12}{}", coupon.code, kind);
            if let Some(cap) = coupon.max_discount {
                line.push_str(&format!(", up to {}", format_price(&config.currency_symbol, cap)));
            }
            if coupon.min_subtotal > 0.0 {
                line.push_str(&format!(
                    ", on orders of {}+",
                    format_price(&config.currency_symbol, coupon.min_subtotal)
                ));
            }
            println!("{}", line);
        }
    }
}

/// Indian digit grouping (`1,23,456`), whole amounts without decimals.
fn format_price(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let rupees = amount.trunc() as u64;
    let paise = ((amount - amount.trunc()) * 100.0).round() as u64;
    let (rupees, paise) = if paise == 100 { (rupees + 1, 0) } else { (rupees, paise) };

    let digits = rupees.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            groups.push(t);
            rest = h;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if negative { "-" } else { "" };
    if paise == 0 {
        format!("{}{}{}", sign, symbol, grouped)
    } else {
        format!("{}{}{}.{:02}", sign, symbol, grouped, paise)
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
