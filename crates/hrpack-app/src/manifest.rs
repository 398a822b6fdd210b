//! `app.json` manifest handling.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::{AppVersion, Error, Result};

/// Manifest file name at the root of an app tree.
pub const MANIFEST_FILE: &str = "app.json";

/// The parts of `app.json` the packer cares about. Other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AppManifest {
    /// Version string in `X.Y.Z` form.
    pub version: String,
    /// Optional app identifier, informational only.
    #[serde(default)]
    pub identifier: Option<String>,
}

impl AppManifest {
    /// Read `app.json` from an app root directory.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(MANIFEST_FILE);
        let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::MissingManifest(path.clone()),
            _ => Error::UnreadableFile {
                path: path.clone(),
                source,
            },
        })?;

        serde_json::from_str(&text).map_err(|source| Error::InvalidManifest { path, source })
    }

    /// Parse the manifest's version.
    pub fn app_version(&self) -> Result<AppVersion> {
        self.version.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let manifest: AppManifest = serde_json::from_str(
            r#"{"identifier": "openSourceWatchface", "version": "1.2.0", "extra": [1, 2]}"#,
        )
        .unwrap();

        assert_eq!(manifest.identifier.as_deref(), Some("openSourceWatchface"));
        assert_eq!(manifest.app_version().unwrap(), AppVersion::new(1, 2, 0));
    }

    #[test]
    fn test_bad_version_in_manifest() {
        let manifest: AppManifest = serde_json::from_str(r#"{"version": "1.2"}"#).unwrap();
        assert!(matches!(
            manifest.app_version(),
            Err(Error::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppManifest::load(dir.path()),
            Err(Error::MissingManifest(_))
        ));

        fs::write(dir.path().join(MANIFEST_FILE), "{\"name\": \"x\"}").unwrap();
        assert!(matches!(
            AppManifest::load(dir.path()),
            Err(Error::InvalidManifest { .. })
        ));
    }
}
