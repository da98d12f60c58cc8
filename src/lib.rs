pub mod brand_scraper;
pub mod config;
pub mod device_scraper;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod onboarding;
pub mod pipeline;
pub mod search;
pub mod utils;

// Re-export main types
pub use brand_scraper::{fetch_brand_list, parse_brand_index};
pub use config::ScraperConfig;
pub use device_scraper::{collect_device_urls, BrandCollector, CollectState, ListingTemplate};
pub use error::{CatalogError, ErrorKind, Result};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use models::{BrandEntry, DeviceUrlIndex};
pub use pipeline::{select_brands, FailurePolicy, Pipeline, RunReport, DEFAULT_BRANDS};
