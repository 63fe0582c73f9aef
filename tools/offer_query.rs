use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use offer_catalog::application::builder::OfferCollectionFactory;
use offer_catalog::query::SortDirection;
use offer_catalog::value_objects::OfferField;
use offer_catalog::Config;

/// Query offers by product, seller, seller type and validity date
#[derive(Parser)]
#[command(name = "offer-query")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    #[arg(long)]
    product_id: Option<i64>,

    #[arg(long)]
    seller_id: Option<i64>,

    /// Validity date, YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Seller type label; defaults to OFFER_SELLER_TYPE
    #[arg(long)]
    seller_type: Option<String>,

    /// Fail when the seller type does not resolve
    #[arg(long)]
    strict: bool,

    #[arg(long)]
    order_by: Option<OfferField>,

    #[arg(long, default_value = "asc")]
    direction: SortDirection,

    #[arg(long)]
    page_size: Option<u32>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Print the number of matching offers instead of the offers
    #[arg(long)]
    count: bool,

    /// Print the generated SQL without executing it
    #[arg(long)]
    explain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    if cli.strict {
        config.strict_seller_type = true;
    }
    if cli.seller_type.is_some() {
        config.default_seller_type = cli.seller_type;
    }

    let factory = OfferCollectionFactory::from_config(&config)
        .await
        .context("failed to initialize offer collection factory")?;

    let mut collection = factory.create().await?;
    if let Some(product_id) = cli.product_id {
        collection.add_product_filter(product_id)?;
    }
    if let Some(seller_id) = cli.seller_id {
        collection.add_seller_filter(seller_id)?;
    }
    if let Some(date) = cli.date {
        collection.add_date_filter(date)?;
    }
    if let Some(field) = cli.order_by {
        collection.set_order(field, cli.direction)?;
    }
    collection
        .set_page_size(cli.page_size)?
        .set_current_page(cli.page)?;

    if cli.explain {
        println!("{}", collection.select().to_sql());
        println!("{}", serde_json::to_string(&collection.select().binds())?);
        return Ok(());
    }

    if cli.count {
        println!("{}", collection.count().await?);
        return Ok(());
    }

    let offers = collection.load().await?;
    println!("{}", serde_json::to_string_pretty(offers)?);

    Ok(())
}
