use std::fmt;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while listing brands and collecting device URLs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The server answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// The request never produced a usable response
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// An expected container element is missing from the document
    #[error("no element matching `{selector}` in {url}")]
    Parse { url: String, selector: String },

    /// A brand profile URL cannot be turned into listing page URLs
    #[error("profile url `{url}` does not look like `<brand>-phones-<id>.php`")]
    Template { url: String },

    /// A selected brand is missing from the brand index
    #[error("brand `{0}` not found in the brand index")]
    NotFound(String),

    /// CSS selector parsing failed
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while collecting one brand
    #[error("brand `{brand}`{}: {source}", page_suffix(.page))]
    Brand {
        brand: String,
        page: Option<u32>,
        #[source]
        source: Box<CatalogError>,
    },
}

fn page_suffix(page: &Option<u32>) -> String {
    match page {
        Some(page) => format!(" (page {page})"),
        None => String::new(),
    }
}

/// Coarse classification used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    Template,
    NotFound,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Fetch => "fetch",
            ErrorKind::Parse => "parse",
            ErrorKind::Template => "template",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl CatalogError {
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Attach brand (and page) context to an error.
    pub fn in_brand(self, brand: impl Into<String>, page: Option<u32>) -> Self {
        Self::Brand {
            brand: brand.into(),
            page,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through brand context.
    pub fn root(&self) -> &CatalogError {
        match self {
            CatalogError::Brand { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            CatalogError::Fetch { .. } | CatalogError::Request { .. } => ErrorKind::Fetch,
            CatalogError::Parse { .. } => ErrorKind::Parse,
            CatalogError::Template { .. } => ErrorKind::Template,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }
}
