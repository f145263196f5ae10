use crate::ports::outbound::DataFetcher;
use crate::shared::error::ModernizerError;
use crate::shared::Result;
use std::time::Duration;
use tracing::{debug, warn};

/// HttpDataFetcher adapter for downloading remote datasets over HTTP
///
/// This adapter implements the DataFetcher port with a blocking reqwest
/// client. Failed requests are retried with a linear back-off.
pub struct HttpDataFetcher {
    client: reqwest::blocking::Client,
    max_retries: u32,
}

impl HttpDataFetcher {
    /// Creates a new fetcher with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("plugin-modernizer/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            anyhow::bail!("server returned status code {}", response.status());
        }

        Ok(response.text()?)
    }

    fn validate_url(url: &str) -> Result<()> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ModernizerError::InvalidArgument {
                message: format!("'{}' is not an http(s) URL", url),
            }
            .into());
        }
        Ok(())
    }
}

impl DataFetcher for HttpDataFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        Self::validate_url(url)?;

        let mut last_error = None;
        for attempt in 1..=self.max_retries {
            debug!(url, attempt, "downloading");
            match self.fetch_once(url) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(url, attempt, error = %e, "download attempt failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        std::thread::sleep(Duration::from_millis(100 * attempt as u64));
                    }
                }
            }
        }

        let details = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempt was made".to_string());
        Err(ModernizerError::DownloadFailed {
            url: url.to_string(),
            details,
        }
        .into())
    }
}
