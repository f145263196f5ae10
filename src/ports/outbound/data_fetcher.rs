use crate::shared::Result;

/// DataFetcher port for plain HTTP GET of remote datasets
///
/// Calls are synchronous and may block for a network round-trip.
/// Timeouts and retries are the implementation's concern.
pub trait DataFetcher: Send + Sync {
    /// Downloads the body at `url` as text
    ///
    /// # Errors
    /// Returns `ModernizerError::DownloadFailed` when the request fails
    /// or the server answers with a non-success status.
    fn fetch_text(&self, url: &str) -> Result<String>;
}
