mod version_format;

pub use version_format::{CurrentBomFormat, LegacyBomFormat, VersionFormat};
