use crate::modernization::domain::{ArtifactCoordinates, BomReference, BuildDescriptor};
use crate::ports::outbound::BuildDescriptorReader;
use crate::shared::error::ModernizerError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// File name of the Maven build descriptor
pub const DESCRIPTOR_FILE: &str = "pom.xml";

/// FileSystemReader adapter for reading build descriptors from disk
///
/// This adapter implements the BuildDescriptorReader port, parsing the
/// parts of a `pom.xml` the pipeline cares about: artifact id, parent
/// version, properties, SCM connection and the imported BOM.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after rejecting symlinks, non-files and oversized files
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_regular_file(path, file_type)?;
        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildDescriptorReader for FileSystemReader {
    fn read_descriptor(&self, project_dir: &Path) -> Result<BuildDescriptor> {
        let pom_path = project_dir.join(DESCRIPTOR_FILE);

        let content = self
            .safe_read_file(&pom_path, DESCRIPTOR_FILE)
            .map_err(|e| ModernizerError::FileReadError {
                path: pom_path.clone(),
                details: e.to_string(),
            })?;

        let mut descriptor =
            parse_descriptor(&content).map_err(|e| ModernizerError::FileReadError {
                path: pom_path,
                details: e.to_string(),
            })?;
        descriptor.directory_name = project_dir
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(project_dir)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        Ok(descriptor)
    }
}

#[derive(Default)]
struct DependencyFields {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    kind: Option<String>,
    scope: Option<String>,
}

impl DependencyFields {
    fn into_bom(self) -> Option<BomReference> {
        if self.scope.as_deref() != Some("import") || self.kind.as_deref() != Some("pom") {
            return None;
        }
        Some(BomReference {
            coordinates: ArtifactCoordinates::new(self.group_id?, self.artifact_id?),
            version: self.version?,
        })
    }
}

/// Parses the fields of a pom.xml used by the pipeline
pub(crate) fn parse_descriptor(xml: &str) -> Result<BuildDescriptor> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut descriptor = BuildDescriptor::default();
    let mut path: Vec<String> = Vec::new();
    let mut dependency: Option<DependencyFields> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if tag == "dependency" && in_dependency_management(&path) {
                    dependency = Some(DependencyFields::default());
                }
                path.push(tag);
            }
            Event::End(_) => {
                if let Some(tag) = path.pop() {
                    if tag == "dependency" {
                        if let Some(bom) = dependency.take().and_then(DependencyFields::into_bom) {
                            descriptor.bom.get_or_insert(bom);
                        }
                    }
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    ["project", "artifactId"] => descriptor.artifact_id = Some(text),
                    ["project", "parent", "version"] => descriptor.parent_version = Some(text),
                    ["project", "properties", name] => {
                        descriptor.properties.insert(name.to_string(), text);
                    }
                    ["project", "scm", "connection"] => descriptor.scm_connection = Some(text),
                    [.., "dependency", field] => {
                        if let Some(dep) = dependency.as_mut() {
                            match *field {
                                "groupId" => dep.group_id = Some(text),
                                "artifactId" => dep.artifact_id = Some(text),
                                "version" => dep.version = Some(text),
                                "type" => dep.kind = Some(text),
                                "scope" => dep.scope = Some(text),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let resolved = descriptor.bom.as_ref().and_then(|bom| {
        bom.version
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .and_then(|name| descriptor.property(name))
    });
    if let (Some(bom), Some(version)) = (descriptor.bom.as_mut(), resolved) {
        bom.version = version;
    }

    Ok(descriptor)
}

fn in_dependency_management(path: &[String]) -> bool {
    path.len() == 3
        && path[0] == "project"
        && path[1] == "dependencyManagement"
        && path[2] == "dependencies"
}
