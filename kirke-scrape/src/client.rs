//! Blocking HTTP client for sogn.dk

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::{Error, Result};

/// Path suffix of the staff page relative to a church's base URL
pub(crate) const STAFF_PAGE_SUFFIX: &str = "praester-medarb";

/// HTTP client for the sogn.dk feed and staff pages
///
/// One client is created per command and reused for every request it makes;
/// requests are synchronous and block the calling thread.
pub struct SognClient {
    http: Client,
    feed_url: String,
}

impl SognClient {
    /// Create a client for the given feed URL
    pub fn new(feed_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("kirkedata/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            feed_url: feed_url.into(),
        })
    }

    /// The configured feed URL
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch the raw church directory feed document
    pub fn fetch_feed(&self) -> Result<String> {
        debug!(url = %self.feed_url, "Fetching church directory feed");
        self.get_text(&self.feed_url)
    }

    /// Fetch a church's staff page.
    ///
    /// The staff page lives at the church's base URL with `praester-medarb`
    /// appended, matching how the site links it.
    pub fn fetch_staff_page(&self, source_url: &str) -> Result<String> {
        let page_url = format!("{}{}", source_url, STAFF_PAGE_SUFFIX);
        Url::parse(&page_url).map_err(|source| Error::InvalidUrl {
            url: page_url.clone(),
            source,
        })?;

        debug!(url = %page_url, "Fetching staff page");
        self.get_text(&page_url)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }
}

impl std::fmt::Debug for SognClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SognClient")
            .field("feed_url", &self.feed_url)
            .finish_non_exhaustive()
    }
}
