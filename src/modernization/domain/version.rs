use crate::shared::error::ModernizerError;
use crate::shared::Result;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Maximum length for version strings (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// A dotted-numeric version such as a core baseline (`2.346.1`).
///
/// Comparison is component-wise; missing trailing components count as
/// zero, so `2.346` and `2.346.0` are equal.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    parts: Vec<u64>,
}

impl DottedVersion {
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(invalid(version, "version cannot be empty"));
        }

        if trimmed.len() > MAX_VERSION_LENGTH {
            return Err(invalid(
                version,
                &format!("longer than {} bytes", MAX_VERSION_LENGTH),
            ));
        }

        let parts = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| invalid(version, &format!("non-numeric component '{}'", part)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: trimmed.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }
}

fn invalid(version: &str, reason: &str) -> anyhow::Error {
    ModernizerError::InvalidVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl FromStr for DottedVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
