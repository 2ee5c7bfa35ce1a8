//! # Seed Data Generator
//!
//! Populates a development catalog with repair services and goods.
//!
//! ## Usage
//! ```bash
//! # Seed ./duka_dev.db
//! cargo run -p duka-db --bin seed
//!
//! # Specify database path
//! cargo run -p duka-db --bin seed -- --db ./data/duka.db
//! ```
//!
//! Seeding is skipped when any category table already has rows.

use duka_core::{Category, Money};
use duka_db::{Database, DbConfig, NewCatalogItem};
use std::env;

const IMAGE_BASE: &str = "https://images.duka.dev";

/// (name, price in shillings, issues handled)
const PHONE_REPAIRS: &[(&str, i64, &str)] = &[
    ("iPhone Screen Replacement", 6500, "Cracked glass, dead pixels, unresponsive touch"),
    ("Samsung Screen Replacement", 5500, "Cracked glass, lines on display"),
    ("Phone Battery Replacement", 2500, "Fast drain, swelling, random shutdowns"),
    ("Charging Port Repair", 1500, "Loose cable, no charging, moisture warning"),
    ("Water Damage Recovery", 3000, "No power after spill, corrosion"),
];

const LAPTOP_REPAIRS: &[(&str, i64, &str)] = &[
    ("Laptop Screen Repair", 9500, "Cracked panel, flickering, no backlight"),
    ("Keyboard Replacement", 4500, "Stuck or missing keys"),
    ("Hinge Repair", 3500, "Loose or broken hinges"),
    ("OS Reinstallation", 1500, "Slow boot, malware, blue screens"),
];

/// (name, price in cents, brand, product category)
const ACCESSORIES: &[(&str, i64, &str, &str)] = &[
    ("USB-C Cable", 50_000, "Oraimo", "Cables"),
    ("Screen Protector", 30_000, "Generic", "Protection"),
    ("Samsung 25W Charger", 150_000, "Samsung", "Chargers"),
    ("Phone Case", 40_000, "Generic", "Protection"),
    ("Power Bank 20000mAh", 249_950, "Oraimo", "Power"),
    ("Wireless Earbuds", 320_000, "Oraimo", "Audio"),
];

/// (name, price in shillings, brand, model)
const REFURBISHED: &[(&str, i64, &str, &str)] = &[
    ("HP EliteBook 840", 38_500, "HP", "EliteBook 840 G5"),
    ("Dell Latitude 7490", 35_000, "Dell", "Latitude 7490"),
    ("Refurbished iPhone 11", 42_000, "Apple", "iPhone 11"),
    ("Samsung Galaxy S10", 24_000, "Samsung", "SM-G973F"),
];

fn image_for(category: Category, name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}/{}/{}.jpg", IMAGE_BASE, category.slug(), slug)
}

fn seed_items() -> Vec<(Category, NewCatalogItem)> {
    let mut items = Vec::new();

    for (category, repairs) in [
        (Category::PhoneRepair, PHONE_REPAIRS),
        (Category::LaptopRepair, LAPTOP_REPAIRS),
    ] {
        for (name, price, issues) in repairs {
            let item = NewCatalogItem::new(*name, Money::from_shillings(*price))
                .image(image_for(category, name))
                .issues(*issues);
            items.push((category, item));
        }
    }

    for (name, cents, brand, product_category) in ACCESSORIES {
        let item = NewCatalogItem::new(*name, Money::from_cents(*cents))
            .image(image_for(Category::Accessories, name))
            .description(format!("Genuine {} {}", brand, name.to_lowercase()))
            .brand(*brand)
            .product_category(*product_category);
        items.push((Category::Accessories, item));
    }

    for (name, price, brand, model) in REFURBISHED {
        let front = image_for(Category::Refurbished, name);
        let back = front.replace(".jpg", "-back.jpg");
        let item = NewCatalogItem::new(*name, Money::from_shillings(*price))
            .image(front)
            .image(back)
            .description("Tested, cleaned and covered by a 3 month warranty")
            .brand(*brand)
            .model(*model)
            .product_category("Refurbished");
        items.push((Category::Refurbished, item));
    }

    items
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./duka_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Duka Catalog Seed");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./duka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Duka Catalog Seed");
    println!("====================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.catalog();

    let mut existing = 0;
    for category in Category::ALL {
        existing += repo.count(category).await?;
    }
    if existing > 0 {
        println!("⚠ Database already has {} catalog rows", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (category, item) in seed_items() {
        if let Err(e) = repo.insert(category, &item).await {
            eprintln!("Failed to insert {} into {}: {}", item.name, category.table(), e);
            continue;
        }
        generated += 1;
    }

    println!();
    for category in Category::ALL {
        println!("  {:<22} {} rows", category.table(), repo.count(category).await?);
    }

    println!();
    println!("✓ Seeded {} items", generated);

    db.close().await;
    Ok(())
}
