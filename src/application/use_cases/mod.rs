/// Use cases module containing application business logic orchestration
mod modernize_plugins;

pub use modernize_plugins::{tags, AbortHandle, ModernizePluginsUseCase};
