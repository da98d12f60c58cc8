use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One brand from the catalog's brand index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub name: String,
    /// Relative URL of the brand's first listing page, e.g. `samsung-phones-9.php`
    pub profile_url: String,
    /// Listing pages to fetch; zero means nothing is collected
    pub page_count: u32,
}

/// Device profile URLs collected per brand.
///
/// URLs keep page order then document order; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceUrlIndex {
    brands: BTreeMap<String, Vec<String>>,
}

impl DeviceUrlIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URL to a brand, creating the brand's entry if needed.
    pub fn push(&mut self, brand: &str, url: impl Into<String>) {
        self.brands
            .entry(brand.to_string())
            .or_default()
            .push(url.into());
    }

    /// URLs collected for `brand`; empty when nothing was collected.
    pub fn urls(&self, brand: &str) -> &[String] {
        self.brands.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_brand(&self, brand: &str) -> bool {
        self.brands.contains_key(brand)
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.brands
            .iter()
            .map(|(brand, urls)| (brand.as_str(), urls.as_slice()))
    }

    /// Number of brands with at least one URL.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn total_urls(&self) -> usize {
        self.brands.values().map(Vec::len).sum()
    }
}
