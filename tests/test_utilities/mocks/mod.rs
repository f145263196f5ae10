/// Mock implementations for testing
mod mock_build_tool;
mod mock_data_fetcher;
mod mock_forge;
mod mock_progress_reporter;

pub use mock_build_tool::MockBuildTool;
pub use mock_data_fetcher::MockDataFetcher;
pub use mock_forge::MockForge;
pub use mock_progress_reporter::MockProgressReporter;
