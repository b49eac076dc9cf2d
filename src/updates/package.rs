//! Update package file-name parsing.
//!
//! Package files follow `<prefix>_<version>_<releasedate>-<suffix>.<ext>`,
//! for example `isam_9.0.2.0_20161102-2353.pkg`. Only the base name is
//! inspected; the file itself is never opened here.

use std::path::Path;

use thiserror::Error;

/// Components extracted from a package file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    /// Base name without its extension (`isam_9.0.2.0_20161102-2353`).
    pub stem: String,
    /// Leading component, a coarse firmware family name (`isam`).
    pub prefix: String,
    /// Version component (`9.0.2.0`).
    pub version: String,
    /// Release date without separators (`20161102`).
    pub release_date: String,
}

/// Reasons a path does not look like an update package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageNameError {
    #[error("path has no UTF-8 file name")]
    NoFileName,

    #[error("file name has no '-' separating the build suffix")]
    MissingHyphen,

    #[error("expected <prefix>_<version>_<date>, found {found} component(s)")]
    MissingComponents { found: usize },
}

/// Parse the base name of `path` into its package components.
pub fn parse_package_name<P: AsRef<Path>>(path: P) -> Result<PackageName, PackageNameError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(PackageNameError::NoFileName)?;

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string();

    let (head, _suffix) = file_name
        .split_once('-')
        .ok_or(PackageNameError::MissingHyphen)?;

    let parts: Vec<&str> = head.split('_').collect();
    match parts.as_slice() {
        [prefix, version, release_date, ..] => Ok(PackageName {
            stem,
            prefix: prefix.to_string(),
            version: version.to_string(),
            release_date: release_date.to_string(),
        }),
        _ => Err(PackageNameError::MissingComponents { found: parts.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_package_name() {
        let parsed = parse_package_name("/tmp/pkgs/isam_9.0.2.0_20161102-2353.pkg").unwrap();

        assert_eq!(parsed.stem, "isam_9.0.2.0_20161102-2353");
        assert_eq!(parsed.prefix, "isam");
        assert_eq!(parsed.version, "9.0.2.0");
        assert_eq!(parsed.release_date, "20161102");
    }

    #[test]
    fn test_parse_without_directory() {
        let parsed = parse_package_name("isam_10.0.0.0_20200601-0101.pkg").unwrap();
        assert_eq!(parsed.version, "10.0.0.0");
        assert_eq!(parsed.release_date, "20200601");
    }

    #[test]
    fn test_parse_splits_on_first_hyphen() {
        let parsed = parse_package_name("isam_9.0.2.0_20161102-2353-hotfix.pkg").unwrap();
        assert_eq!(parsed.release_date, "20161102");
        assert_eq!(parsed.stem, "isam_9.0.2.0_20161102-2353-hotfix");
    }

    #[test]
    fn test_parse_extra_underscore_components_ignored() {
        let parsed = parse_package_name("isam_9.0.2.0_20161102_extra-2353.pkg").unwrap();
        assert_eq!(parsed.prefix, "isam");
        assert_eq!(parsed.version, "9.0.2.0");
        assert_eq!(parsed.release_date, "20161102");
    }

    #[test]
    fn test_parse_missing_hyphen() {
        assert_eq!(
            parse_package_name("isam_9.0.2.0_20161102.pkg"),
            Err(PackageNameError::MissingHyphen)
        );
    }

    #[test]
    fn test_parse_too_few_components() {
        assert_eq!(
            parse_package_name("isam_9.0.2.0-2353.pkg"),
            Err(PackageNameError::MissingComponents { found: 2 })
        );
        assert_eq!(
            parse_package_name("update-1.pkg"),
            Err(PackageNameError::MissingComponents { found: 1 })
        );
    }

    #[test]
    fn test_parse_no_file_name() {
        assert_eq!(parse_package_name("/"), Err(PackageNameError::NoFileName));
        assert_eq!(parse_package_name(".."), Err(PackageNameError::NoFileName));
    }

    #[test]
    fn test_hyphen_in_directory_is_ignored() {
        assert_eq!(
            parse_package_name("/opt/my-packages/isam_9.0.2.0_20161102.pkg"),
            Err(PackageNameError::MissingHyphen)
        );
    }
}
