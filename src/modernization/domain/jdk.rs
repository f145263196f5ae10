//! JDK catalog and compatibility rules against core baselines.
//!
//! The catalog is a closed, hand-curated set ordered by major version.
//! Every function here is pure; malformed baselines fail with
//! [`ModernizerError::InvalidVersion`] instead of defaulting.

use super::version::DottedVersion;
use crate::shared::error::ModernizerError;
use crate::shared::Result;
use std::fmt;

/// A JDK the plugins can be built with
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Jdk {
    major: u32,
    lts: bool,
    /// First core baseline supporting this JDK (open when `None`)
    compatible_since: Option<&'static str>,
    /// Last core baseline supporting this JDK (open when `None`)
    max_baseline: Option<&'static str>,
    /// Lowest plugin parent POM version that builds on this JDK
    companion_library_version: Option<&'static str>,
}

/// The full catalog, ascending by major version, one entry per major.
pub static JDKS: [Jdk; 4] = [
    Jdk {
        major: 8,
        lts: true,
        compatible_since: None,
        max_baseline: Some("2.346.3"),
        companion_library_version: Some("4.51"),
    },
    Jdk {
        major: 11,
        lts: true,
        compatible_since: Some("2.164.1"),
        max_baseline: Some("2.462.3"),
        companion_library_version: Some("4.88"),
    },
    Jdk {
        major: 17,
        lts: true,
        compatible_since: Some("2.346.1"),
        max_baseline: None,
        companion_library_version: Some("5.9"),
    },
    Jdk {
        major: 21,
        lts: true,
        compatible_since: Some("2.426.1"),
        max_baseline: None,
        companion_library_version: Some("5.9"),
    },
];

impl Jdk {
    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn is_lts(&self) -> bool {
        self.lts
    }

    pub fn compatible_since(&self) -> Option<&'static str> {
        self.compatible_since
    }

    pub fn max_baseline(&self) -> Option<&'static str> {
        self.max_baseline
    }

    pub fn companion_library_version(&self) -> Option<&'static str> {
        self.companion_library_version
    }

    /// Looks up a catalog entry by major version
    pub fn from_major(major: u32) -> Option<&'static Jdk> {
        JDKS.iter().find(|jdk| jdk.major == major)
    }

    /// Checks both baseline bounds; unset bounds are open.
    pub fn supports(&self, baseline: &DottedVersion) -> Result<bool> {
        if let Some(since) = self.compatible_since {
            if DottedVersion::parse(since)? > *baseline {
                return Ok(false);
            }
        }
        if let Some(max) = self.max_baseline {
            if DottedVersion::parse(max)? < *baseline {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for Jdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JDK {}", self.major)
    }
}

/// Every catalog JDK usable with the given core baseline, ascending by major.
pub fn compatible_jdks(baseline: &str) -> Result<Vec<&'static Jdk>> {
    let baseline = DottedVersion::parse(baseline)?;
    let mut compatible = Vec::new();
    for jdk in JDKS.iter() {
        if jdk.supports(&baseline)? {
            compatible.push(jdk);
        }
    }
    Ok(compatible)
}

/// LTS entries of the catalog
pub fn lts_jdks() -> Vec<&'static Jdk> {
    JDKS.iter().filter(|jdk| jdk.lts).collect()
}

/// Highest and second-highest JDK of the set.
///
/// A single element yields itself twice. An empty set is treated like the
/// full catalog, the same rule [`minimum`] and [`maximum`] follow.
pub fn highest_two(jdks: &[&'static Jdk]) -> (&'static Jdk, &'static Jdk) {
    let mut sorted: Vec<&'static Jdk> = if jdks.is_empty() {
        JDKS.iter().collect()
    } else {
        jdks.to_vec()
    };
    sorted.sort_by(|a, b| b.major.cmp(&a.major));
    let highest = sorted[0];
    let second = sorted.get(1).copied().unwrap_or(highest);
    (highest, second)
}

/// Lowest JDK of the set, or of the whole catalog when the set is empty.
pub fn minimum(jdks: &[&'static Jdk]) -> &'static Jdk {
    jdks.iter()
        .copied()
        .min_by_key(|jdk| jdk.major)
        .unwrap_or(&JDKS[0])
}

/// Highest JDK of the set, or of the whole catalog when the set is empty.
pub fn maximum(jdks: &[&'static Jdk]) -> &'static Jdk {
    jdks.iter()
        .copied()
        .max_by_key(|jdk| jdk.major)
        .unwrap_or(&JDKS[JDKS.len() - 1])
}

/// Next catalog entry by major version
pub fn next(jdk: &Jdk) -> Option<&'static Jdk> {
    JDKS.iter().find(|candidate| candidate.major > jdk.major)
}

/// Previous catalog entry by major version
pub fn previous(jdk: &Jdk) -> Option<&'static Jdk> {
    JDKS.iter().rev().find(|candidate| candidate.major < jdk.major)
}

/// Companion library version for a baseline.
///
/// The oldest compatible JDK decides, so a build never depends on a
/// library newer than its lowest supported JDK can run.
pub fn companion_library_version_for(baseline: Option<&str>) -> Result<Option<&'static str>> {
    let baseline = match baseline.map(str::trim) {
        Some(b) if !b.is_empty() => b,
        _ => {
            return Err(ModernizerError::InvalidArgument {
                message: "core baseline must not be empty".to_string(),
            }
            .into())
        }
    };
    let compatible = compatible_jdks(baseline)?;
    Ok(minimum(&compatible).companion_library_version)
}
