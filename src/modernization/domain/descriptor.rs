use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Property a build descriptor may use to name its hosted repository
pub const REPOSITORY_PROPERTY: &str = "gitHubRepo";

/// Property holding the core baseline version
pub const BASELINE_PROPERTY: &str = "jenkins.version";

/// Maximum `${...}` substitution depth when resolving properties
const MAX_INTERPOLATION_DEPTH: usize = 5;

/// Group and artifact id of a published Maven artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinates {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactCoordinates {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A versioned BOM import found in a build descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomReference {
    pub coordinates: ArtifactCoordinates,
    pub version: String,
}

/// Facts read from a plugin's local build descriptor (pom.xml)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDescriptor {
    pub artifact_id: Option<String>,
    pub parent_version: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub scm_connection: Option<String>,
    pub bom: Option<BomReference>,
    /// Name of the directory holding the descriptor
    pub directory_name: Option<String>,
}

impl BuildDescriptor {
    /// Property value with `${name}` references to other properties expanded
    pub fn property(&self, name: &str) -> Option<String> {
        let mut value = self.properties.get(name)?.clone();
        for _ in 0..MAX_INTERPOLATION_DEPTH {
            let Some(start) = value.find("${") else {
                break;
            };
            let Some(len) = value[start..].find('}') else {
                break;
            };
            let reference = &value[start + 2..start + len];
            let Some(replacement) = self.properties.get(reference) else {
                break;
            };
            value = format!("{}{}{}", &value[..start], replacement, &value[start + len + 1..]);
        }
        Some(value)
    }

    /// Core baseline declared by the descriptor, if fully resolvable
    pub fn baseline(&self) -> Option<String> {
        self.property(BASELINE_PROPERTY)
            .filter(|version| !version.contains("${"))
    }

    /// Repository name from local SCM hints.
    ///
    /// Falls back in order: explicit repository property, the trailing path
    /// segment of the SCM connection (without `.git`), the directory name.
    pub fn repository_name(&self) -> Option<String> {
        self.property(REPOSITORY_PROPERTY)
            .filter(|value| !value.contains("${"))
            .and_then(|value| trailing_segment(&value))
            .or_else(|| {
                self.scm_connection
                    .as_deref()
                    .filter(|connection| !connection.contains("${"))
                    .and_then(trailing_segment)
            })
            .or_else(|| self.directory_name.clone().filter(|d| !d.is_empty()))
    }
}

/// Last path segment of a URL-ish string, stripped of a trailing `.git`
pub fn trailing_segment(value: &str) -> Option<String> {
    let segment = value
        .trim()
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()?;
    let segment = segment.strip_suffix(".git").unwrap_or(segment);
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}
