//! MSME CLI - Seed, inspect and edit the dashboard data directory.
//!
//! # Usage
//!
//! ```bash
//! # Seed collections that are still absent
//! msme-cli seed
//!
//! # Overwrite everything with the seed data
//! msme-cli seed --force
//!
//! # Add a product and record an order for it
//! msme-cli products create -n Widget -p 100 -s 5 -c Hardware
//! msme-cli orders create --customer CUST-001 --item <product-id>:2
//!
//! # Headline numbers
//! msme-cli stats
//! ```
//!
//! # Environment Variables
//!
//! - `MSME_DATA_DIR` - Data directory shared with the server (default: .msme-data)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use msme_core::{CustomerGroup, CustomerId, Email, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "msme-cli")]
#[command(author, version, about = "MSME dashboard CLI tools")]
struct Cli {
    /// Data directory (overrides `MSME_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write seed data for absent collections
    Seed {
        /// Overwrite existing collections and reset id counters
        #[arg(long)]
        force: bool,
    },
    /// Remove every collection and the session
    Reset,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Show dashboard headline numbers
    Stats,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products with stock levels
    List,
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        /// Unit price in KSH
        #[arg(short, long)]
        price: Decimal,

        #[arg(short, long)]
        stock: u32,

        #[arg(short, long)]
        category: String,

        /// Selling unit, e.g. "kg" or "bag"
        #[arg(short, long)]
        unit: Option<String>,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Set the stock count of a product
    Stock { id: ProductId, stock: u32 },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List,
    /// Place an order for an existing customer
    Create {
        #[arg(short, long)]
        customer: CustomerId,

        /// Line item as `<product-id>:<quantity>`; repeatable
        #[arg(short, long = "item", required = true, value_parser = commands::orders::parse_item)]
        items: Vec<(ProductId, u32)>,
    },
    /// Change the status of an order
    Status { id: OrderId, status: OrderStatus },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers with their aggregates
    List,
    /// Create a customer
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: Email,

        #[arg(short, long, default_value = "")]
        phone: String,

        /// `vip`, `regular` or `new`
        #[arg(short, long, default_value = "new")]
        group: CustomerGroup,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::open_store(cli.data_dir)?;

    match cli.command {
        Commands::Seed { force } => commands::data::seed(&store, force).await?,
        Commands::Reset => commands::data::reset(&store).await?,
        Commands::Stats => commands::data::stats(&store).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&store).await?,
            ProductAction::Create {
                name,
                price,
                stock,
                category,
                unit,
                description,
            } => {
                commands::products::create(
                    &store,
                    commands::products::ProductInput {
                        name,
                        price,
                        stock,
                        category,
                        unit,
                        description,
                    },
                )
                .await?;
            }
            ProductAction::Stock { id, stock } => {
                commands::products::set_stock(&store, &id, stock).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&store, &id).await?,
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&store).await?,
            OrderAction::Create { customer, items } => {
                commands::orders::create(&store, &customer, items).await?;
            }
            OrderAction::Status { id, status } => {
                commands::orders::set_status(&store, &id, status).await?;
            }
        },
        Commands::Customers { action } => match action {
            CustomerAction::List => commands::customers::list(&store).await?,
            CustomerAction::Create {
                name,
                email,
                phone,
                group,
            } => commands::customers::create(&store, name, email, phone, group).await?,
        },
    }
    Ok(())
}
