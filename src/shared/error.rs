use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean run,
/// a run where some plugins failed, and a run that never got going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every plugin was processed without a recorded error
    Success = 0,
    /// The batch completed but at least one plugin recorded an error
    PluginFailures = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, cache, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PluginFailures => write!(f, "Plugin Failures (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for plugin modernization.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Errors travel as `anyhow::Error`; callers that need to branch on the
/// kind use `downcast_ref::<ModernizerError>()`.
#[derive(Debug, Error)]
pub enum ModernizerError {
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Plugin '{plugin}' not found: {details}\n\n💡 Hint: Check the plugin name against the update center")]
    PluginNotFound { plugin: String, details: String },

    #[error("Cached entry '{key}' under '{path}' is unreadable: {details}")]
    CacheCorrupted {
        path: PathBuf,
        key: String,
        details: String,
    },

    #[error("Failed to download {url}\nDetails: {details}\n\n💡 Hint: Please check your network connection")]
    DownloadFailed { url: String, details: String },

    #[error("Stage '{stage}' failed for plugin '{plugin}'")]
    StageFailed { plugin: String, stage: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl ModernizerError {
    /// Returns true when the error means "the thing is not there",
    /// as opposed to a failure while looking for it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModernizerError::PluginNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::PluginFailures.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::PluginFailures),
            "Plugin Failures (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_invalid_version_display() {
        let error = ModernizerError::InvalidVersion {
            version: "2.x".to_string(),
            reason: "non-numeric component 'x'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid version '2.x'"));
        assert!(display.contains("non-numeric component"));
    }

    #[test]
    fn test_plugin_not_found_display() {
        let error = ModernizerError::PluginNotFound {
            plugin: "ghost".to_string(),
            details: "absent from update center".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Plugin 'ghost' not found"));
        assert!(display.contains("💡 Hint:"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_cache_corrupted_display() {
        let error = ModernizerError::CacheCorrupted {
            path: PathBuf::from("."),
            key: "update-center.json".to_string(),
            details: "expected value at line 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("update-center.json"));
        assert!(display.contains("unreadable"));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_stage_failed_display() {
        let error = ModernizerError::StageFailed {
            plugin: "foo".to_string(),
            stage: "verify".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Stage 'verify' failed for plugin 'foo'"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = ModernizerError::InvalidArgument {
            message: "baseline must not be empty".to_string(),
        }
        .into();
        let typed = err.downcast_ref::<ModernizerError>();
        assert!(matches!(
            typed,
            Some(ModernizerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_security_error_display() {
        let error = ModernizerError::SecurityError {
            path: PathBuf::from("../escape"),
            reason: "parent directory segments are not allowed".to_string(),
            hint: "Use a path relative to the cache root".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("../escape"));
        assert!(display.contains("Use a path relative to the cache root"));
    }
}
