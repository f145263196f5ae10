use crate::modernization::domain::ArtifactCoordinates;
use crate::shared::Result;

/// VersionIndex port listing every published version of an artifact
pub trait VersionIndex {
    /// All published versions, in no particular order
    ///
    /// # Errors
    /// Returns an error when the index cannot be downloaded or parsed.
    fn published_versions(&self, artifact: &ArtifactCoordinates) -> Result<Vec<String>>;
}
