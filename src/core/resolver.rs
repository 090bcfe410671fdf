use crate::domain::model::PackageReference;
use crate::utils::error::{PydevError, Result};
use std::path::{Component, Path, PathBuf};

const PACKAGE_MARKER: &str = "__init__.py";

/// Turns user supplied path strings into absolute host paths.
///
/// Relative paths are resolved against the invoking process's working
/// directory (never the config file's location). Symlinks are left as-is.
#[derive(Debug, Clone)]
pub struct PathResolver {
    working_dir: PathBuf,
    home_dir: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(working_dir: impl Into<PathBuf>, home_dir: Option<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            home_dir,
        }
    }

    pub fn from_env() -> Result<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::new(working_dir, dirs::home_dir()))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// 展開 `~`、補成絕對路徑並整理 `.` 與 `..`
    pub fn expand(&self, raw: &str) -> PathBuf {
        let expanded = match (&self.home_dir, raw) {
            (Some(home), "~") => home.clone(),
            (Some(home), _) if raw.starts_with("~/") => home.join(&raw[2..]),
            _ => PathBuf::from(raw),
        };

        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.working_dir.join(expanded)
        };

        normalize(&absolute)
    }

    pub fn resolve_package(&self, reference: &PackageReference) -> Result<PathBuf> {
        let invalid = |reason: &str| PydevError::InvalidPackage {
            path: reference.raw.clone(),
            origin: reference.provenance.to_string(),
            reason: reason.to_string(),
        };

        if reference.raw.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let path = self.expand(&reference.raw);
        let metadata = std::fs::metadata(&path)
            .map_err(|_| invalid(&format!("'{}' does not exist", path.display())))?;

        if !metadata.is_dir() {
            return Err(invalid(&format!("'{}' is not a directory", path.display())));
        }

        if !path.join(PACKAGE_MARKER).is_file() {
            return Err(invalid(&format!(
                "'{}' is missing the expected {} file",
                path.display(),
                PACKAGE_MARKER
            )));
        }

        tracing::debug!(
            "Resolved package {} ({}) -> {}",
            reference.raw,
            reference.provenance,
            path.display()
        );
        Ok(path)
    }

    pub fn resolve_directory(&self, raw: &str) -> Result<PathBuf> {
        let path = self.expand(raw);

        if !path.is_dir() {
            return Err(PydevError::InvalidDirectory {
                path: raw.to_string(),
                reason: format!("'{}' is not an existing directory", path.display()),
            });
        }

        Ok(path)
    }
}

// 純字面整理，不查詢檔案系統，所以 symlink 不會被解開
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_package(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("__init__.py"), "").unwrap();
        dir
    }

    #[test]
    fn test_expand_home_and_relative() {
        let resolver = PathResolver::new("/work/project", Some(PathBuf::from("/home/dev")));

        assert_eq!(resolver.expand("~"), PathBuf::from("/home/dev"));
        assert_eq!(resolver.expand("~/my/utils"), PathBuf::from("/home/dev/my/utils"));
        assert_eq!(resolver.expand("libs/core"), PathBuf::from("/work/project/libs/core"));
        assert_eq!(resolver.expand("./a/../b"), PathBuf::from("/work/project/b"));
        assert_eq!(resolver.expand("../sibling"), PathBuf::from("/work/sibling"));
        assert_eq!(resolver.expand("/abs/path/"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn test_expand_without_home_keeps_tilde_literal() {
        let resolver = PathResolver::new("/work", None);
        assert_eq!(resolver.expand("~/x"), PathBuf::from("/work/~/x"));
    }

    #[test]
    fn test_resolve_valid_package() {
        let temp_dir = TempDir::new().unwrap();
        let package = make_package(temp_dir.path(), "utils");
        let resolver = PathResolver::new(temp_dir.path(), None);

        let resolved = resolver
            .resolve_package(&PackageReference::cli("utils"))
            .unwrap();
        assert_eq!(resolved, package);
    }

    #[test]
    fn test_resolve_package_missing_marker() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("plain")).unwrap();
        let resolver = PathResolver::new(temp_dir.path(), None);

        for reference in [PackageReference::cli("plain"), PackageReference::config("plain")] {
            let err = resolver.resolve_package(&reference).unwrap_err();
            assert!(matches!(err, PydevError::InvalidPackage { .. }));
            assert!(err.to_string().contains("__init__.py"));
        }
    }

    #[test]
    fn test_resolve_package_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("module.py"), "").unwrap();
        let resolver = PathResolver::new(temp_dir.path(), None);

        let err = resolver
            .resolve_package(&PackageReference::config("module.py"))
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert!(err.to_string().contains("from config file"));
    }

    #[test]
    fn test_resolve_package_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(temp_dir.path(), None);

        let err = resolver
            .resolve_package(&PackageReference::cli("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_marker_must_be_a_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("odd/__init__.py")).unwrap();
        let resolver = PathResolver::new(temp_dir.path(), None);

        assert!(resolver
            .resolve_package(&PackageReference::cli("odd"))
            .is_err());
    }

    #[test]
    fn test_resolve_directory() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(temp_dir.path(), None);

        assert_eq!(resolver.resolve_directory(".").unwrap(), temp_dir.path());
        assert!(matches!(
            resolver.resolve_directory("missing"),
            Err(PydevError::InvalidDirectory { .. })
        ));
    }
}
