use crate::modernization::domain::BuildDescriptor;
use crate::shared::Result;
use std::path::Path;

/// BuildDescriptorReader port for reading a plugin's local build descriptor
pub trait BuildDescriptorReader: Send + Sync {
    /// Reads the descriptor (pom.xml) found in `project_dir`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The descriptor does not exist or is not a regular file
    /// - The file cannot be read or is not well-formed
    fn read_descriptor(&self, project_dir: &Path) -> Result<BuildDescriptor>;
}
