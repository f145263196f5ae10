/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod build;
pub mod cache;
pub mod console;
pub mod filesystem;
pub mod forge;
pub mod formatters;
pub mod network;
