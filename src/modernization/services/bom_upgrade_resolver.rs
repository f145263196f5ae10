use crate::modernization::domain::ArtifactCoordinates;
use crate::modernization::policies::{CurrentBomFormat, LegacyBomFormat, VersionFormat};
use crate::ports::outbound::VersionIndex;
use crate::shared::Result;
use std::cmp::Ordering;
use tracing::debug;

/// BomUpgradeResolver service for choosing a BOM upgrade target
///
/// Published versions are split by two version formats: the current
/// scheme and the legacy one it replaced. When the current version is an
/// incremental build, or is not a known current-format release, the newest
/// current-format release wins (falling back to the newest legacy
/// release), which may move an incremental back to the latest stable
/// release. Otherwise only a strictly newer current-format release is
/// returned.
pub struct BomUpgradeResolver {
    current_format: Box<dyn VersionFormat>,
    legacy_format: Box<dyn VersionFormat>,
}

impl BomUpgradeResolver {
    pub fn new() -> Self {
        Self::with_formats(Box::new(CurrentBomFormat), Box::new(LegacyBomFormat))
    }

    pub fn with_formats(
        current_format: Box<dyn VersionFormat>,
        legacy_format: Box<dyn VersionFormat>,
    ) -> Self {
        Self {
            current_format,
            legacy_format,
        }
    }

    /// Looks up published versions and selects the upgrade target
    ///
    /// # Returns
    /// `None` when no change is needed. A failing index lookup is the only
    /// error.
    pub fn resolve<I>(
        &self,
        artifact: &ArtifactCoordinates,
        current_version: &str,
        index: &I,
    ) -> Result<Option<String>>
    where
        I: VersionIndex + ?Sized,
    {
        let published = index.published_versions(artifact)?;
        let target = self.select(current_version, &published);
        debug!(
            artifact = %artifact,
            current = current_version,
            target = target.as_deref().unwrap_or("-"),
            "resolved BOM upgrade"
        );
        Ok(target.filter(|version| version != current_version))
    }

    /// Pure selection over an already fetched version list
    pub fn select(&self, current_version: &str, published: &[String]) -> Option<String> {
        let mut current_candidates: Vec<&str> = published
            .iter()
            .map(String::as_str)
            .filter(|v| self.current_format.accepts(v, current_version))
            .collect();
        let mut legacy_candidates: Vec<&str> = published
            .iter()
            .map(String::as_str)
            .filter(|v| self.legacy_format.accepts(v, current_version))
            .collect();

        let current_is_release = self.current_format.is_release(current_version);
        let current_is_listed = current_candidates.contains(&current_version);

        if (!current_is_release && !current_candidates.is_empty()) || !current_is_listed {
            current_candidates.sort_by(|a, b| self.current_format.compare(a, b));
            if let Some(latest) = current_candidates.last() {
                return Some(latest.to_string());
            }
            legacy_candidates.sort_by(|a, b| self.legacy_format.compare(a, b));
            if let Some(latest) = legacy_candidates.last() {
                return Some(latest.to_string());
            }
            return Some(current_version.to_string());
        }

        current_candidates
            .into_iter()
            .filter(|v| self.current_format.compare(v, current_version) == Ordering::Greater)
            .max_by(|a, b| self.current_format.compare(a, b))
            .map(String::from)
    }
}

impl Default for BomUpgradeResolver {
    fn default() -> Self {
        Self::new()
    }
}
