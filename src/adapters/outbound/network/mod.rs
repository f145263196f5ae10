/// Network adapters for remote dataset downloads
mod http_fetcher;

pub use http_fetcher::HttpDataFetcher;
