use crate::domain::model::{ResolvedPackage, TargetPlatform};
use crate::utils::error::{PydevError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MountPlanner<'a> {
    container_directory: &'a str,
    platform: TargetPlatform,
}

impl<'a> MountPlanner<'a> {
    pub fn new(container_directory: &'a str, platform: TargetPlatform) -> Self {
        Self {
            container_directory,
            platform,
        }
    }

    /// Assigns every package a mount point under the container directory.
    /// Two different host paths with the same directory name are rejected
    /// rather than renamed.
    pub fn plan(&self, host_paths: &[PathBuf]) -> Result<Vec<ResolvedPackage>> {
        let mut seen: HashMap<String, &Path> = HashMap::new();
        let mut packages = Vec::with_capacity(host_paths.len());

        for host_path in host_paths {
            let name = leaf_name(host_path)?;
            let container_path = join_container_path(self.container_directory, &name);

            if let Some(first) = seen.get(&name) {
                return Err(PydevError::DuplicateMount {
                    container_path,
                    first: first.to_path_buf(),
                    second: host_path.clone(),
                });
            }
            seen.insert(name.clone(), host_path);

            tracing::debug!("Mounting {} at {}", host_path.display(), container_path);
            packages.push(ResolvedPackage {
                host_path: host_path.clone(),
                container_path,
                name,
            });
        }

        Ok(packages)
    }

    pub fn pythonpath(&self, packages: &[ResolvedPackage]) -> String {
        let separator = self.platform.path_list_separator().to_string();
        packages
            .iter()
            .map(|p| p.container_path.as_str())
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

fn leaf_name(host_path: &Path) -> Result<String> {
    let name = host_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PydevError::InvalidPackage {
            path: host_path.display().to_string(),
            origin: "mount planning".to_string(),
            reason: "directory name is missing or not valid UTF-8".to_string(),
        })?;
    Ok(name.to_string())
}

pub fn join_container_path(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
