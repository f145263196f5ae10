use clap::Parser;
use plugin_modernizer::application::dto::OutputFormat;
use std::path::PathBuf;

/// Modernize plugins in batch: resolve JDKs, apply recipes, open pull requests
#[derive(Parser, Debug)]
#[command(name = "plugin-modernizer")]
#[command(version)]
#[command(
    about = "Modernize plugins in batch: resolve JDKs, apply recipes, open pull requests",
    long_about = None
)]
pub struct Args {
    /// Plugins to modernize, comma separated: --plugins git,mailer
    #[arg(short, long, value_delimiter = ',', value_name = "NAME")]
    pub plugins: Vec<String>,

    /// File with one plugin name per line ('#' starts a comment)
    #[arg(long, value_name = "PATH")]
    pub plugin_file: Option<PathBuf>,

    /// Already checked out plugin directories, comma separated
    #[arg(long, value_delimiter = ',', value_name = "DIR")]
    pub local: Vec<PathBuf>,

    /// Transformation recipes to apply, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "RECIPE")]
    pub recipes: Vec<String>,

    /// Run without committing, pushing or opening pull requests
    #[arg(long)]
    pub dry_run: bool,

    /// Only collect metadata; skip compile, transform and verify
    #[arg(long)]
    pub fetch_metadata_only: bool,

    /// Delete forks that did not end with an open pull request
    #[arg(long)]
    pub clean_forks: bool,

    /// Skip plugins the update center lists as deprecated
    #[arg(long)]
    pub skip_deprecated: bool,

    /// Wipe the cache before the run
    #[arg(long)]
    pub clean_cache: bool,

    /// Plugins processed concurrently
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Health score under which a plugin is tagged low-score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub low_score_threshold: Option<u32>,

    /// Cache directory (defaults to ./.plugin-modernizer-cache)
    #[arg(long, value_name = "DIR")]
    pub cache_path: Option<PathBuf>,

    /// Maven executable used to build plugins
    #[arg(long, value_name = "PATH")]
    pub maven_executable: Option<PathBuf>,

    /// Report format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Report file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config file (defaults to ./plugin-modernizer.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Reads plugin names from a plugin file's content
pub fn parse_plugin_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
