use crate::shared::error::ModernizerError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum length of a cache key
const MAX_KEY_LENGTH: usize = 255;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "pom.xml")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_FILE_SIZE`]
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE
        );
    }

    Ok(())
}

/// Validates a cache scope path.
///
/// Scopes are always relative to the cache root: `.` for the shared scope,
/// or a plugin name for a private scope. Absolute paths and `..` segments
/// would let an entry escape the managed root.
pub fn validate_scope_path(path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ModernizerError::SecurityError {
                    path: path.to_path_buf(),
                    reason: "parent directory segments are not allowed".to_string(),
                    hint: "Use a path relative to the cache root".to_string(),
                }
                .into());
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ModernizerError::SecurityError {
                    path: path.to_path_buf(),
                    reason: "absolute paths are not allowed".to_string(),
                    hint: "Use a path relative to the cache root".to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Validates a cache key, which must name a single file inside its scope.
pub fn validate_cache_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        anyhow::bail!("Cache key cannot be empty");
    }

    if key.len() > MAX_KEY_LENGTH {
        anyhow::bail!(
            "Cache key is too long ({} bytes). Maximum allowed: {} bytes",
            key.len(),
            MAX_KEY_LENGTH
        );
    }

    if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(ModernizerError::SecurityError {
            path: key.into(),
            reason: "cache keys must not contain path separators".to_string(),
            hint: "Put the entry in a scope path instead".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates a value that is interpolated into a remote URL
///
/// # Errors
/// Returns an error if the value contains path separators, `..`, or
/// URL-unsafe characters (`#`, `?`, `@`).
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} cannot be empty", component_type);
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            component_type
        );
    }

    if component.contains('#') || component.contains('?') || component.contains('@') {
        anyhow::bail!(
            "Security: {} contains URL-unsafe characters",
            component_type
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("pom.xml");
        fs::write(&file_path, "<project/>").unwrap();

        assert!(validate_regular_file(&file_path, "pom.xml").is_ok());
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "test directory");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_nonexistent() {
        let result = validate_regular_file(&PathBuf::from("/nonexistent/pom.xml"), "pom.xml");
        assert!(result.is_err());
    }

    #[test]
    fn test_scope_path_shared_and_private() {
        assert!(validate_scope_path(Path::new(".")).is_ok());
        assert!(validate_scope_path(Path::new("git-plugin")).is_ok());
        assert!(validate_scope_path(Path::new("git-plugin/reports")).is_ok());
    }

    #[test]
    fn test_scope_path_rejects_escape() {
        let err = validate_scope_path(Path::new("../outside")).unwrap_err();
        assert!(err.to_string().contains("parent directory"));

        let err = validate_scope_path(Path::new("/etc")).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_cache_key_validation() {
        assert!(validate_cache_key("update-center.json").is_ok());
        assert!(validate_cache_key("").is_err());
        assert!(validate_cache_key("a/b.json").is_err());
        assert!(validate_cache_key("..").is_err());
        assert!(validate_cache_key(&"k".repeat(MAX_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_max_file_size_constant() {
        assert_eq!(MAX_FILE_SIZE, 100 * 1024 * 1024);
    }

    #[test]
    fn test_validate_url_component() {
        assert!(validate_url_component("io.jenkins.tools.bom", "Group id").is_ok());
        assert!(validate_url_component("bom-2.440.x", "Artifact id").is_ok());
        assert!(validate_url_component("", "Artifact id").is_err());
        assert!(validate_url_component("a/b", "Artifact id").is_err());
        assert!(validate_url_component("a..b", "Artifact id").is_err());
        assert!(validate_url_component("a?x=1", "Artifact id").is_err());
        assert!(validate_url_component("user@host", "Artifact id").is_err());
    }
}
