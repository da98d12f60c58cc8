use std::process::ExitCode;

use clap::Parser;
use gsmarena_catalog::logging::init_logging;
use gsmarena_catalog::{fetch_brand_list, select_brands, HttpFetcher, ListingTemplate, Result, ScraperConfig};
use tracing::error;

/// Show how a brand would be paged without fetching its listings.
#[derive(Parser, Debug)]
#[command(name = "inspect_brand")]
struct Args {
    /// Brand name as it appears in the brand index
    brand: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(false);

    match inspect(&args.brand) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn inspect(name: &str) -> Result<()> {
    let config = ScraperConfig::from_env()?;
    let fetcher = HttpFetcher::new(&config)?;

    let brands = fetch_brand_list(&fetcher, &config)?;
    let brand = select_brands(&brands, &[name])?[0];

    println!("Brand:       {}", brand.name);
    println!("Profile URL: {}", config.absolute_url(&brand.profile_url));
    println!("Pages:       {}", brand.page_count);

    let template = ListingTemplate::parse(&brand.profile_url)?;
    for page in 0..brand.page_count {
        println!("  p{:<3} {}", page, config.absolute_url(&template.page_path(page)));
    }

    Ok(())
}
