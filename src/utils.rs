use scraper::{ElementRef, Html, Selector};

use crate::error::{CatalogError, Result};
use crate::models::{BrandEntry, DeviceUrlIndex};

/// Compile a CSS selector.
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CatalogError::selector(css, format!("{e:?}")))
}

/// First element matching `css`, or a parse error naming the page.
pub fn first_container<'a>(document: &'a Html, css: &str, url: &str) -> Result<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    document
        .select(&selector)
        .next()
        .ok_or_else(|| CatalogError::Parse {
            url: url.to_string(),
            selector: css.to_string(),
        })
}

/// All anchors below `container`, in document order.
pub fn anchors<'a>(container: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    let selector = parse_selector("a")?;
    Ok(container.select(&selector).collect())
}

/// Concatenated text content of an element.
pub fn text_content(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Format the brand list as a table.
pub fn format_brand_table(brands: &[BrandEntry]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<4} {:<24} {:>6}  {}\n", "#", "Brand", "Pages", "URL"));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for (i, brand) in brands.iter().enumerate() {
        output.push_str(&format!(
            "{:<4} {:<24} {:>6}  {}\n",
            i + 1,
            brand.name,
            brand.page_count,
            brand.profile_url
        ));
    }

    output
}

/// Format per-brand URL counts.
pub fn format_index_summary(index: &DeviceUrlIndex) -> String {
    let mut output = String::new();

    for (brand, urls) in index.iter() {
        output.push_str(&format!("  {:<24} {:>6} devices\n", brand, urls.len()));
    }
    output.push_str(&format!(
        "  {:<24} {:>6} devices\n",
        "Total",
        index.total_urls()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_container_missing() {
        let document = Html::parse_document("<div class=\"other\"><a href=\"x\">x</a></div>");
        let err = first_container(&document, ".makers", "page.php").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_anchor_text_content() {
        let document =
            Html::parse_document("<div class=\"st-text\"><a href=\"a.php\">Acer<br><span>100 devices</span></a></div>");
        let container = first_container(&document, ".st-text", "makers.php3").unwrap();
        let links = anchors(container).unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(text_content(&links[0]), "Acer100 devices");
    }

    #[test]
    fn test_brand_table_lists_every_brand() {
        let brands = vec![
            BrandEntry {
                name: "Acer".into(),
                profile_url: "acer-phones-59.php".into(),
                page_count: 3,
            },
            BrandEntry {
                name: "O2".into(),
                profile_url: "o2-phones-30.php".into(),
                page_count: 1,
            },
        ];

        let table = format_brand_table(&brands);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("acer-phones-59.php"));
    }
}
