/// Source forge adapters
mod git_cli_forge;

pub use git_cli_forge::{ForgeSettings, GitCliForge};
