mod cli;
mod config;

use cli::{parse_plugin_list, Args};
use config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use plugin_modernizer::adapters::outbound::build::{MavenInvoker, DEFAULT_MAVEN_EXECUTABLE};
use plugin_modernizer::adapters::outbound::cache::FileCacheStore;
use plugin_modernizer::adapters::outbound::console::StderrProgressReporter;
use plugin_modernizer::adapters::outbound::filesystem::FileSystemReader;
use plugin_modernizer::adapters::outbound::forge::GitCliForge;
use plugin_modernizer::adapters::outbound::network::HttpDataFetcher;
use plugin_modernizer::application::dto::{ModernizationRequest, OutputFormat, RunReport};
use plugin_modernizer::application::factories::{FormatterFactory, PresenterFactory};
use plugin_modernizer::application::services::PluginMetadataService;
use plugin_modernizer::application::use_cases::ModernizePluginsUseCase;
use plugin_modernizer::shared::error::{ExitCode, ModernizerError};
use plugin_modernizer::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CACHE_DIR: &str = ".plugin-modernizer-cache";
/// Clones live next to the cached datasets so `--clean-cache` resets both
const CHECKOUT_DIR: &str = ".checkouts";

fn main() {
    let args = Args::parse_args();
    init_tracing(args.debug);

    match run(args) {
        Ok(report) if report.has_failures() => process::exit(ExitCode::PluginFailures.as_i32()),
        Ok(_) => process::exit(ExitCode::Success.as_i32()),
        Err(e) => {
            eprintln!("\n{} An error occurred:\n", "❌".red());
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\n{} {}", "Caused by:".yellow(), err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<RunReport> {
    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => match discover_config(Path::new("."))? {
            Some(config) => {
                info!("Auto-discovered config file: {}", CONFIG_FILENAME);
                config
            }
            None => ConfigFile::default(),
        },
    };
    let settings = merge(args, config)?;

    let cache = Arc::new(FileCacheStore::new(&settings.cache_path));
    let metadata = PluginMetadataService::new(
        HttpDataFetcher::new()?,
        Arc::clone(&cache),
        FileSystemReader::new(),
        settings.config.endpoints.clone().unwrap_or_default(),
    );
    let forge = GitCliForge::new(
        settings.config.forge.clone().unwrap_or_default(),
        settings.cache_path.join(CHECKOUT_DIR),
    );
    let build_tool = MavenInvoker::new(
        settings
            .config
            .maven_executable
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAVEN_EXECUTABLE)),
        settings.config.jdk_homes.clone().unwrap_or_default(),
    );

    let use_case = ModernizePluginsUseCase::new(
        forge,
        build_tool,
        metadata,
        StderrProgressReporter::new(),
    );
    let report = use_case.execute(settings.request)?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let output = formatter.format(&report)?;
    PresenterFactory::create(settings.output.into()).present(&output)?;

    Ok(report)
}

/// Effective settings after CLI arguments override the config file
#[derive(Debug)]
struct Settings {
    request: ModernizationRequest,
    format: OutputFormat,
    output: Option<PathBuf>,
    cache_path: PathBuf,
    config: ConfigFile,
}

fn merge(args: Args, mut config: ConfigFile) -> Result<Settings> {
    let mut plugins = args.plugins;
    if let Some(path) = args.plugin_file.as_deref() {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModernizerError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        plugins.extend(parse_plugin_list(&content));
    }
    if plugins.is_empty() && args.local.is_empty() {
        plugins = config.plugins.take().unwrap_or_default();
    }
    if plugins.iter().any(|p| p.trim().is_empty()) {
        return Err(ModernizerError::Validation {
            message: "plugin names cannot be empty".to_string(),
        }
        .into());
    }

    let mut request = ModernizationRequest::new(plugins);
    request.local_plugins = args.local;
    request.recipes = if args.recipes.is_empty() {
        config.recipes.take().unwrap_or_default()
    } else {
        args.recipes
    };
    request.dry_run = args.dry_run || config.dry_run.unwrap_or(false);
    request.fetch_metadata_only =
        args.fetch_metadata_only || config.fetch_metadata_only.unwrap_or(false);
    request.clean_forks = args.clean_forks || config.clean_forks.unwrap_or(false);
    request.skip_deprecated = args.skip_deprecated || config.skip_deprecated.unwrap_or(false);
    request.clean_cache = args.clean_cache;
    if let Some(workers) = args.workers.map(|w| w as usize).or(config.workers) {
        request.workers = workers;
    }
    if let Some(threshold) = args.low_score_threshold.or(config.low_score_threshold) {
        request.low_score_threshold = threshold;
    }

    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(value)) => value
            .parse()
            .map_err(|message| ModernizerError::InvalidArgument { message })?,
        (None, None) => OutputFormat::default(),
    };

    if args.maven_executable.is_some() {
        config.maven_executable = args.maven_executable;
    }
    let cache_path = args
        .cache_path
        .or_else(|| config.cache_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));

    Ok(Settings {
        request,
        format,
        output: args.output,
        cache_path,
        config,
    })
}
