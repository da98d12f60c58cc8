use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::models::BrandEntry;
use crate::utils::{anchors, first_container, text_content};

/// Container holding the brand links on the index page.
pub const BRAND_INDEX_CONTAINER: &str = ".st-text";

const O2_LABEL: &str = "O2";
const TEL_ME_LABEL: &str = "Tel.Me.";

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-zA-Z\s&-]+").expect("brand name pattern is valid"))
}

fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Fetch the brand index and parse every brand from it.
pub fn fetch_brand_list<F: PageFetcher>(fetcher: &F, config: &ScraperConfig) -> Result<Vec<BrandEntry>> {
    let url = config.index_url();
    info!(%url, "fetching brand index");

    let body = fetcher.fetch(&url)?;
    let brands = parse_brand_index(&body, &url, config.devices_per_page)?;

    info!(brands = brands.len(), "brand index parsed");
    Ok(brands)
}

/// Parse brand entries from the index page markup.
///
/// `url` is only used in error messages. Anchors without a usable name or
/// href are skipped; order follows the document.
pub fn parse_brand_index(html: &str, url: &str, devices_per_page: u64) -> Result<Vec<BrandEntry>> {
    let document = Html::parse_document(html);
    let container = first_container(&document, BRAND_INDEX_CONTAINER, url)?;

    let mut brands = Vec::new();

    for anchor in anchors(container)? {
        let text = text_content(&anchor);
        let href = anchor.value().attr("href").unwrap_or_default();

        match brand_from_anchor(&text, href, devices_per_page) {
            Some(brand) => brands.push(brand),
            None => debug!(text = text.trim(), href, "skipping brand anchor"),
        }
    }

    Ok(brands)
}

/// Build a brand from one index anchor's text and href.
pub fn brand_from_anchor(text: &str, href: &str, devices_per_page: u64) -> Option<BrandEntry> {
    let (name, page_count) = if text.trim().contains(O2_LABEL) {
        (O2_LABEL.to_string(), 1)
    } else {
        (brand_name(text), page_count(text, devices_per_page))
    };

    if name.is_empty() || href.is_empty() {
        return None;
    }

    Some(BrandEntry {
        name,
        profile_url: href.to_string(),
        page_count,
    })
}

/// Display name for an anchor text that is not the O2 label.
pub fn brand_name(text: &str) -> String {
    if text.trim().contains(TEL_ME_LABEL) {
        return TEL_ME_LABEL.to_string();
    }

    name_pattern()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Listing pages for the largest number embedded in `text`.
///
/// Text without digits yields zero pages.
pub fn page_count(text: &str, devices_per_page: u64) -> u32 {
    let max_devices = digits_pattern()
        .find_iter(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .max();

    match max_devices {
        Some(devices) => {
            let pages = devices.div_ceil(devices_per_page.max(1));
            u32::try_from(pages).unwrap_or(u32::MAX)
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, ErrorKind};
    use crate::fetcher::MemoryFetcher;

    const INDEX_HTML: &str = r#"
        <html><body>
        <div class="brandmenu-v2"><a href="nav.php">Nav 1</a></div>
        <div class="st-text">
          <table><tr>
            <td><a href="samsung-phones-9.php">Samsung<br><span>1393 devices</span></a></td>
            <td><a href="o2-phones-30.php">O2<br><span>45 devices</span></a></td>
            <td><a href="tel_me_-phones-123.php">Tel.Me.<br><span>12 devices</span></a></td>
            <td><a href="at&amp;t-phones-57.php">AT&amp;T<br><span>4 devices</span></a></td>
            <td><a href="bird-phones-37.php">Bird<br><span>61 devices</span></a></td>
            <td><a href="1234-phones-1.php">1234</a></td>
            <td><a>Orphan<br><span>3 devices</span></a></td>
            <td><a href="nodigits-phones-2.php">Nodigits</a></td>
          </tr></table>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_brand_index() {
        let brands = parse_brand_index(INDEX_HTML, "makers.php3", 50).unwrap();
        let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();

        assert_eq!(names, vec!["Samsung", "O2", "Tel.Me.", "AT&T", "Bird", "Nodigits"]);
        assert_eq!(brands[0].profile_url, "samsung-phones-9.php");
        assert_eq!(brands[0].page_count, 28);
        assert_eq!(brands[3].profile_url, "at&t-phones-57.php");
        assert_eq!(brands[3].page_count, 1);
        assert_eq!(brands[4].page_count, 2);
        assert_eq!(brands[5].page_count, 0);
    }

    #[test]
    fn test_o2_forces_single_page() {
        let brand = brand_from_anchor("  O2 987 devices ", "o2-phones-30.php", 50).unwrap();
        assert_eq!(brand.name, "O2");
        assert_eq!(brand.page_count, 1);

        let brand = brand_from_anchor("VodafoneO2", "o2-phones-30.php", 50).unwrap();
        assert_eq!(brand.name, "O2");
        assert_eq!(brand.page_count, 1);
    }

    #[test]
    fn test_tel_me_label() {
        let brand = brand_from_anchor("Tel.Me.12 devices", "tel_me_-phones-123.php", 50).unwrap();
        assert_eq!(brand.name, "Tel.Me.");
        assert_eq!(brand.page_count, 1);
    }

    #[test]
    fn test_page_count_uses_largest_number() {
        assert_eq!(page_count("Brand 12 and 340", 50), 7);
        assert_eq!(page_count("Brand 50 devices", 50), 1);
        assert_eq!(page_count("Brand 51 devices", 50), 2);
        assert_eq!(page_count("Brand 0 devices", 50), 0);
        assert_eq!(page_count("Brand", 50), 0);
        assert_eq!(page_count("Brand 99999999999999999999999", 50), u32::MAX);
    }

    #[test]
    fn test_page_count_ignores_non_ascii_digits() {
        assert_eq!(page_count("Brand \u{0661}\u{0662} devices", 50), 0);
        assert_eq!(page_count("Brand \u{0661}\u{0662} 120 devices", 50), 3);
    }

    #[test]
    fn test_anchor_without_name_is_dropped() {
        assert!(brand_from_anchor("1234", "1234-phones-1.php", 50).is_none());
        assert!(brand_from_anchor("", "empty-phones-1.php", 50).is_none());
        assert!(brand_from_anchor("   ", "blank-phones-1.php", 50).is_none());
        assert!(brand_from_anchor("Acer 100 devices", "", 50).is_none());
    }

    #[test]
    fn test_name_takes_first_letter_run() {
        assert_eq!(brand_name("Samsung1393 devices"), "Samsung");
        assert_eq!(brand_name("Sony Ericsson 190 devices"), "Sony Ericsson");
        assert_eq!(brand_name("Hewlett-Packard"), "Hewlett-Packard");
        assert_eq!(brand_name("4G Brand"), "G Brand");
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let first = parse_brand_index(INDEX_HTML, "makers.php3", 50).unwrap();
        let second = parse_brand_index(INDEX_HTML, "makers.php3", 50).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_container_is_parse_error() {
        let err = parse_brand_index("<div class=\"makers\"></div>", "makers.php3", 50).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_fetch_brand_list() {
        let config = ScraperConfig::default();
        let fetcher = MemoryFetcher::new().with_page(config.index_url(), INDEX_HTML);

        let brands = fetch_brand_list(&fetcher, &config).unwrap();
        assert_eq!(brands.len(), 6);
        assert_eq!(fetcher.requests(), vec![config.index_url()]);
    }

    #[test]
    fn test_fetch_brand_list_failure() {
        let config = ScraperConfig::default();
        let fetcher = MemoryFetcher::new().with_status(config.index_url(), 429);

        let err = fetch_brand_list(&fetcher, &config).unwrap_err();
        assert!(matches!(err, CatalogError::Fetch { status: 429, .. }));
    }
}
