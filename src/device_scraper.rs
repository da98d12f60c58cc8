use std::thread;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::{CatalogError, Result};
use crate::fetcher::PageFetcher;
use crate::models::{BrandEntry, DeviceUrlIndex};
use crate::utils::{anchors, first_container};

/// Container holding the device links on a listing page.
pub const LISTING_CONTAINER: &str = ".makers";

/// Paged listing URLs derived from a brand profile URL.
///
/// `samsung-phones-9.php` becomes `samsung-phones-f-9-0-p<page>.php`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTemplate {
    prefix: String,
    brand_id: String,
}

impl ListingTemplate {
    pub fn parse(profile_url: &str) -> Result<Self> {
        let invalid = || CatalogError::Template {
            url: profile_url.to_string(),
        };

        let segments: Vec<&str> = profile_url.split('-').collect();
        if segments.len() < 3 {
            return Err(invalid());
        }

        let (slug, kind, id_part) = (segments[0], segments[1], segments[2]);
        let brand_id = id_part.split('.').next().unwrap_or_default();
        if slug.is_empty() || kind.is_empty() || brand_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            prefix: format!("{slug}-{kind}"),
            brand_id: brand_id.to_string(),
        })
    }

    /// Relative URL of the zero-based listing page `page`.
    pub fn page_path(&self, page: u32) -> String {
        format!("{}-f-{}-0-p{}.php", self.prefix, self.brand_id, page)
    }
}

/// Where a brand collection currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectState {
    Pending,
    Fetching { page: u32 },
    Parsing { page: u32 },
    Done,
    Failed { page: Option<u32> },
}

impl CollectState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CollectState::Done | CollectState::Failed { .. })
    }
}

/// Outcome of a successful brand collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub pages_fetched: u32,
    pub urls_added: usize,
}

/// Walks the listing pages of one brand and feeds a [`DeviceUrlIndex`].
pub struct BrandCollector<'a, F: PageFetcher> {
    fetcher: &'a F,
    config: &'a ScraperConfig,
    brand: &'a BrandEntry,
    state: CollectState,
}

impl<'a, F: PageFetcher> BrandCollector<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a ScraperConfig, brand: &'a BrandEntry) -> Self {
        Self {
            fetcher,
            config,
            brand,
            state: CollectState::Pending,
        }
    }

    pub fn state(&self) -> &CollectState {
        &self.state
    }

    fn transition(&mut self, next: CollectState) {
        debug!(brand = %self.brand.name, from = ?self.state, to = ?next, "collector state");
        self.state = next;
    }

    /// Fetch every listing page and append its device URLs to `index`.
    ///
    /// On failure the URLs of pages already parsed stay in `index`.
    pub fn run(&mut self, index: &mut DeviceUrlIndex) -> Result<CollectSummary> {
        let brand = self.brand;
        info!(brand = %brand.name, pages = brand.page_count, "collecting device urls");

        if brand.page_count == 0 {
            warn!(brand = %brand.name, "brand has no listing pages, nothing to collect");
            self.transition(CollectState::Done);
            return Ok(CollectSummary::default());
        }

        let template = match ListingTemplate::parse(&brand.profile_url) {
            Ok(template) => template,
            Err(e) => {
                self.transition(CollectState::Failed { page: None });
                return Err(e.in_brand(&brand.name, None));
            }
        };

        let mut summary = CollectSummary::default();

        for page in 0..brand.page_count {
            if page > 0 && !self.config.delay_between_pages.is_zero() {
                thread::sleep(self.config.delay_between_pages);
            }

            match self.collect_page(&template, page, index) {
                Ok(added) => {
                    summary.pages_fetched += 1;
                    summary.urls_added += added;
                }
                Err(e) => {
                    self.transition(CollectState::Failed { page: Some(page) });
                    return Err(e.in_brand(&brand.name, Some(page)));
                }
            }
        }

        self.transition(CollectState::Done);
        info!(
            brand = %brand.name,
            pages = summary.pages_fetched,
            urls = summary.urls_added,
            "brand collected"
        );
        Ok(summary)
    }

    fn collect_page(&mut self, template: &ListingTemplate, page: u32, index: &mut DeviceUrlIndex) -> Result<usize> {
        self.transition(CollectState::Fetching { page });
        let url = self.config.absolute_url(&template.page_path(page));
        let body = self.fetcher.fetch(&url)?;

        self.transition(CollectState::Parsing { page });
        let urls = parse_device_listing(&body, &url)?;
        let added = urls.len();
        for device_url in urls {
            index.push(&self.brand.name, device_url);
        }

        debug!(brand = %self.brand.name, page, added, "listing page parsed");
        Ok(added)
    }
}

/// Device profile URLs on one listing page, in document order.
pub fn parse_device_listing(html: &str, url: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let container = first_container(&document, LISTING_CONTAINER, url)?;

    Ok(anchors(container)?
        .into_iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect())
}

/// Collect all device URLs of `brand` into `index`.
pub fn collect_device_urls<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    brand: &BrandEntry,
    index: &mut DeviceUrlIndex,
) -> Result<CollectSummary> {
    BrandCollector::new(fetcher, config, brand).run(index)
}
