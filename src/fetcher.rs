#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::{CatalogError, Result};

/// Source of HTML documents, one blocking request at a time.
pub trait PageFetcher {
    /// Fetch `url` and return the body of a successful response.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP with a blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.request_timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| CatalogError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).send().map_err(|source| CatalogError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| CatalogError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Serves canned responses and remembers every URL asked for.
///
/// Unknown URLs answer with HTTP 404.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, (u16, String)>,
    requests: RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a 200 response.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (200, body.into()));
        self
    }

    /// Register a response with an arbitrary status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), (status, String::new()));
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[cfg(test)]
impl PageFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());

        match self.pages.get(url) {
            Some((status, body)) if (200..300).contains(status) => Ok(body.clone()),
            Some((status, _)) => Err(CatalogError::Fetch {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(CatalogError::Fetch {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
