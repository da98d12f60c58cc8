use std::thread;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::brand_scraper::fetch_brand_list;
use crate::config::ScraperConfig;
use crate::device_scraper::{BrandCollector, CollectState};
use crate::error::{CatalogError, Result};
use crate::fetcher::PageFetcher;
use crate::models::{BrandEntry, DeviceUrlIndex};

/// Brands collected when none are named on the command line.
pub const DEFAULT_BRANDS: &[&str] = &["Samsung", "BlackBerry", "Celkon", "Huawei", "LG", "Bird"];

/// Resolve brand names against the brand index, by exact match.
///
/// Fails on the first name that is not in the index.
pub fn select_brands<'a, S: AsRef<str>>(brands: &'a [BrandEntry], names: &[S]) -> Result<Vec<&'a BrandEntry>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            brands
                .iter()
                .find(|brand| brand.name == name)
                .ok_or_else(|| CatalogError::NotFound(name.to_string()))
        })
        .collect()
}

/// How a run reacts to a failing brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing brand
    #[default]
    Abort,
    /// Record the failure and continue with the next brand
    KeepGoing,
}

/// Result of collecting one brand.
#[derive(Debug)]
pub struct BrandOutcome {
    pub brand: String,
    pub state: CollectState,
    pub pages_fetched: u32,
    pub urls: usize,
    pub error: Option<CatalogError>,
}

impl BrandOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub brands: Vec<BrandEntry>,
    pub index: DeviceUrlIndex,
    pub outcomes: Vec<BrandOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &BrandOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Sequential two-stage run: list brands, then collect each selected brand.
pub struct Pipeline<'a, F: PageFetcher> {
    fetcher: &'a F,
    config: &'a ScraperConfig,
    policy: FailurePolicy,
}

impl<'a, F: PageFetcher> Pipeline<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a ScraperConfig) -> Self {
        Self {
            fetcher,
            config,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run both stages for the named brands.
    ///
    /// Brand index failures and unknown names are returned as errors. Brand
    /// failures end up in the report; with [`FailurePolicy::Abort`] no
    /// further brand is attempted after the first failure.
    pub fn run<S: AsRef<str>>(&self, names: &[S]) -> Result<RunReport> {
        let started_at = Utc::now();

        let brands = fetch_brand_list(self.fetcher, self.config)?;
        let selected: Vec<BrandEntry> = select_brands(&brands, names)?.into_iter().cloned().collect();

        let mut index = DeviceUrlIndex::new();
        let mut outcomes = Vec::with_capacity(selected.len());

        for (i, brand) in selected.iter().enumerate() {
            if i > 0 && !self.config.delay_between_brands.is_zero() {
                thread::sleep(self.config.delay_between_brands);
            }

            info!("[{}/{}] {}", i + 1, selected.len(), brand.name);
            let outcome = self.collect_brand(brand, &mut index);
            let failed = !outcome.succeeded();
            outcomes.push(outcome);

            if failed && self.policy == FailurePolicy::Abort {
                break;
            }
        }

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            brands,
            index,
            outcomes,
        })
    }

    fn collect_brand(&self, brand: &BrandEntry, index: &mut DeviceUrlIndex) -> BrandOutcome {
        let mut collector = BrandCollector::new(self.fetcher, self.config, brand);
        let result = collector.run(index);
        debug_assert!(collector.state().is_terminal());

        match result {
            Ok(summary) => BrandOutcome {
                brand: brand.name.clone(),
                state: collector.state().clone(),
                pages_fetched: summary.pages_fetched,
                urls: summary.urls_added,
                error: None,
            },
            Err(e) => {
                error!(brand = %brand.name, kind = %e.kind(), "{e}");
                // pages before the failing one were parsed
                let pages_fetched = match collector.state() {
                    CollectState::Failed { page: Some(page) } => *page,
                    _ => 0,
                };
                BrandOutcome {
                    brand: brand.name.clone(),
                    state: collector.state().clone(),
                    pages_fetched,
                    urls: index.urls(&brand.name).len(),
                    error: Some(e),
                }
            }
        }
    }
}
