//! # Duka Storefront CLI
//!
//! Browses the catalog from a terminal.
//!
//! ## Usage
//! ```bash
//! duka-storefront search screen
//! duka-storefront list refurbished
//! duka-storefront show /product/accessories/3
//! duka-storefront checkout /product/accessories/1 /product/accessories/2
//!
//! # Explicit config file
//! duka-storefront --config ./storefront.toml list phone
//! ```

use std::env;
use std::path::PathBuf;

use anyhow::bail;

use duka_core::{CatalogItem, ItemAction};
use duka_storefront::{init_tracing, Route, Storefront, StorefrontConfig};

fn print_help() {
    println!("Duka Storefront");
    println!();
    println!("Usage: duka-storefront [OPTIONS] <COMMAND> [ARGS]...");
    println!();
    println!("Commands:");
    println!("  search <QUERY>          Search every category by name");
    println!("  list <CATEGORY>         List phone | laptop | accessories | refurbished");
    println!("  show <ROUTE>            Show one item, e.g. /product/accessories/3");
    println!("  checkout <ROUTE>...     Add items to a cart and print the order link");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>     Config file (default: platform config dir)");
    println!("  -h, --help              Show this help message");
}

fn print_item(shop: &Storefront, item: &CatalogItem) {
    println!(
        "  {:<32} {:>14}   {}",
        item.name,
        item.price.to_string(),
        shop.route_for(item)
    );
}

fn print_detail(shop: &Storefront, item: &CatalogItem) {
    println!("{}", item.name);
    println!("  Price: {}", item.price);
    if let Some(description) = &item.description {
        println!("  {}", description);
    }
    if let Some(issues) = &item.issues {
        println!("  Fixes: {}", issues);
    }
    for (label, value) in item.specifications() {
        println!("  {}: {}", label, value);
    }
    for image in &item.images {
        println!("  Image: {}", image);
    }

    if item.action() == ItemAction::RequestRepair {
        println!("  Talk to Us: {}", shop.inquiry_url(item));
    }
    println!("  Ask Questions: {}", shop.question_url(item));
}

async fn lookup(shop: &Storefront, raw: &str) -> anyhow::Result<CatalogItem> {
    let route = Route::parse(raw)?;
    Ok(shop.product(&route).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => rest.push(other.to_string()),
        }
        i += 1;
    }

    let Some((command, params)) = rest.split_first() else {
        print_help();
        return Ok(());
    };

    let config = StorefrontConfig::load(config_path)?;
    let shop = Storefront::open(&config).await?;

    match command.as_str() {
        "search" => {
            shop.load_catalog().await;
            let results = shop.search(&params.join(" "));
            if results.is_empty() {
                println!("No results");
            }
            for item in &results {
                print_item(&shop, item);
            }
        }
        "list" => {
            let Some(slug) = params.first() else {
                bail!("list needs a category");
            };
            let Route::Category(category) = Route::parse(slug)? else {
                bail!("Not a category: {}", slug);
            };

            shop.aggregator().refresh(category).await;
            println!("{}", category.listing_title());
            for item in shop.listing(category) {
                print_item(&shop, &item);
            }
        }
        "show" => {
            let Some(raw) = params.first() else {
                bail!("show needs a product route");
            };
            let item = lookup(&shop, raw).await?;
            print_detail(&shop, &item);
        }
        "checkout" => {
            for raw in params {
                let item = lookup(&shop, raw).await?;
                shop.add_to_cart(&item);
            }

            println!("{}", shop.cart().message());
            match shop.checkout_url() {
                Some(url) => println!("\nSend order: {}", url),
                None => println!("\nCart is empty"),
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
        }
    }

    Ok(())
}
