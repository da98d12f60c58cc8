use std::process::ExitCode;

use clap::Parser;
use gsmarena_catalog::logging::init_logging;
use gsmarena_catalog::utils::{format_brand_table, format_index_summary};
use gsmarena_catalog::{
    fetch_brand_list, FailurePolicy, HttpFetcher, Pipeline, Result, RunReport, ScraperConfig, DEFAULT_BRANDS,
};
use tracing::error;

/// Collect device profile URLs for GSMArena brands.
#[derive(Parser, Debug)]
#[command(name = "gsmarena-catalog", version)]
struct Cli {
    /// Brand names to collect, matched exactly against the brand index
    brands: Vec<String>,

    /// Print the brand index and exit
    #[arg(long)]
    list_brands: bool,

    /// Print the collected URLs as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Continue with the next brand when one fails
    #[arg(long)]
    keep_going: bool,

    /// Site root (overrides GSMARENA_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(kind = %e.kind(), "{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let mut config = ScraperConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
        config.validate()?;
    }

    let fetcher = HttpFetcher::new(&config)?;

    if cli.list_brands {
        let brands = fetch_brand_list(&fetcher, &config)?;
        println!("{}", format_brand_table(&brands));
        return Ok(true);
    }

    let names: Vec<String> = if cli.brands.is_empty() {
        DEFAULT_BRANDS.iter().map(|name| name.to_string()).collect()
    } else {
        cli.brands.clone()
    };

    let policy = if cli.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::Abort
    };

    let report = Pipeline::new(&fetcher, &config).with_policy(policy).run(&names)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.index)?);
    } else {
        print_report(&report);
    }

    Ok(report.is_success())
}

fn print_report(report: &RunReport) {
    println!("{}", "=".repeat(60));
    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!(
                "✓ {} ({} pages, {} devices)",
                outcome.brand, outcome.pages_fetched, outcome.urls
            ),
            Some(e) => println!("✗ {}: {}", outcome.brand, e),
        }
    }
    println!();
    print!("{}", format_index_summary(&report.index));
    println!(
        "  Finished in {}s",
        (report.finished_at - report.started_at).num_seconds()
    );
    println!("{}", "=".repeat(60));
}
