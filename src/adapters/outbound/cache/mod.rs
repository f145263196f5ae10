/// Durable cache adapters
mod file_cache_store;

pub use file_cache_store::FileCacheStore;
