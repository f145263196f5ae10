use crate::modernization::domain::DottedVersion;
use std::cmp::Ordering;

/// A BOM version scheme: which identifiers are releases, which are
/// acceptable upgrade candidates, and how they order.
///
/// Kept as a trait so a future scheme change can be added as another
/// implementation without touching the resolver.
pub trait VersionFormat: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &'static str;

    /// True when `version` is a well-formed release in this scheme
    fn is_release(&self, version: &str) -> bool;

    /// True when `candidate` may be offered as the next version of `current`
    fn accepts(&self, candidate: &str, current: &str) -> bool {
        let _ = current;
        self.is_release(candidate)
    }

    /// Total order over releases of this scheme
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Continuous-delivery BOM versions: `<build>.v<commit>`,
/// e.g. `3208.vb_21177d4b_cd9`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentBomFormat;

impl CurrentBomFormat {
    fn build_number(version: &str) -> Option<u64> {
        let (build, commit) = version.split_once(".v")?;
        if commit.is_empty()
            || !commit
                .chars()
                .all(|c| c.is_ascii_hexdigit() || c == '_')
        {
            return None;
        }
        build.parse().ok()
    }
}

impl VersionFormat for CurrentBomFormat {
    fn name(&self) -> &'static str {
        "current"
    }

    fn is_release(&self, version: &str) -> bool {
        Self::build_number(version).is_some()
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (Self::build_number(a), Self::build_number(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => a.cmp(b),
        }
    }
}

/// Pre-redesign BOM versions: plain dotted numbers, e.g. `1409.2` or `26`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBomFormat;

impl VersionFormat for LegacyBomFormat {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn is_release(&self, version: &str) -> bool {
        DottedVersion::parse(version).is_ok()
    }

    /// A legacy candidate never moves a legacy current version backwards.
    fn accepts(&self, candidate: &str, current: &str) -> bool {
        let Ok(candidate) = DottedVersion::parse(candidate) else {
            return false;
        };
        match DottedVersion::parse(current) {
            Ok(current) => candidate >= current,
            Err(_) => true,
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (DottedVersion::parse(a), DottedVersion::parse(b)) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Ok(_)) => Ordering::Less,
            (Err(_), Err(_)) => a.cmp(b),
        }
    }
}
