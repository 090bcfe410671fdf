use crate::config::yaml_config::YamlConfig;
use crate::core::mounts::MountPlanner;
use crate::core::resolver::PathResolver;
use crate::core::shorthand::{parse_port, parse_volume};
use crate::domain::model::{
    EffectiveConfig, PackageReference, TargetPlatform, CONTAINER_SOURCE_DIRECTORY,
    DEFAULT_CONTAINER_DIRECTORY,
};
use crate::utils::error::{PydevError, Result};
use crate::utils::validation::{validate_container_path, validate_environment_key, Validate};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Settings that come from the command line rather than the config file.
#[derive(Debug, Clone, Default)]
pub struct CliInputs {
    pub packages: Vec<String>,
    pub container_directory: Option<String>,
    /// Already resolved host directory mounted as the container source.
    pub source_directory: PathBuf,
}

pub struct ConfigMerger<'a> {
    resolver: &'a PathResolver,
    platform: TargetPlatform,
}

impl<'a> ConfigMerger<'a> {
    pub fn new(resolver: &'a PathResolver) -> Self {
        Self {
            resolver,
            platform: TargetPlatform::default(),
        }
    }

    pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Builds the effective configuration. Nothing is returned unless every
    /// package, environment entry, port and volume is valid.
    pub fn merge(&self, cli: &CliInputs, file: Option<&YamlConfig>) -> Result<EffectiveConfig> {
        if let Some(config) = file {
            config.validate()?;
        }

        let container_directory = resolve_container_directory(
            cli.container_directory.as_deref(),
            file.and_then(YamlConfig::container_directory),
        )?;

        let references: Vec<PackageReference> = cli
            .packages
            .iter()
            .map(PackageReference::cli)
            .chain(
                file.map(YamlConfig::package_paths)
                    .unwrap_or(&[])
                    .iter()
                    .map(PackageReference::config),
            )
            .collect();

        let host_paths = self.resolve_packages(&references)?;
        let packages =
            MountPlanner::new(&container_directory, self.platform).plan(&host_paths)?;

        let environment = match file.and_then(YamlConfig::environment) {
            Some(env) => build_environment(env.entries()?)?,
            None => BTreeMap::new(),
        };

        let network = file.and_then(YamlConfig::network).map(str::to_string);

        let ports = file
            .map(YamlConfig::ports)
            .unwrap_or(&[])
            .iter()
            .map(|entry| parse_port(&entry.as_spec()))
            .collect::<Result<Vec<_>>>()?;

        let volumes = file
            .map(YamlConfig::volumes)
            .unwrap_or(&[])
            .iter()
            .map(|spec| parse_volume(spec, self.resolver))
            .collect::<Result<Vec<_>>>()?;

        let config = EffectiveConfig {
            container_directory,
            packages,
            environment,
            network,
            ports,
            volumes,
            platform: self.platform,
        };

        ensure_distinct_mount_points(&config, &cli.source_directory)?;

        tracing::info!(
            "📦 {} python package(s) mounted under {}",
            config.packages.len(),
            config.container_directory
        );
        Ok(config)
    }

    // CLI 在前、設定檔在後；同一路徑重複出現時保留第一個
    fn resolve_packages(&self, references: &[PackageReference]) -> Result<Vec<PathBuf>> {
        let mut resolved: Vec<PathBuf> = Vec::with_capacity(references.len());

        for reference in references {
            let path = self.resolver.resolve_package(reference)?;
            if resolved.contains(&path) {
                tracing::debug!(
                    "Skipping duplicate package {} ({})",
                    path.display(),
                    reference.provenance
                );
                continue;
            }
            resolved.push(path);
        }

        Ok(resolved)
    }
}

/// CLI > config file > `/pypath`
pub fn resolve_container_directory(cli: Option<&str>, file: Option<&str>) -> Result<String> {
    let (source, value) = match (cli, file) {
        (Some(dir), _) => ("--container-directory", dir),
        (None, Some(dir)) => ("python_packages.container_directory", dir),
        (None, None) => ("default", DEFAULT_CONTAINER_DIRECTORY),
    };

    validate_container_path(source, value)?;
    tracing::debug!("Using container directory {} ({})", value, source);
    Ok(value.to_string())
}

fn build_environment(entries: Vec<(String, String)>) -> Result<BTreeMap<String, String>> {
    let mut environment = BTreeMap::new();

    for (key, value) in entries {
        validate_environment_key(&key)?;
        if environment.insert(key.clone(), value).is_some() {
            return Err(PydevError::config_parse(format!(
                "docker_options.environment defines '{key}' more than once"
            )));
        }
    }

    Ok(environment)
}

/// 原始碼、套件與額外 volume 不可掛載到同一個容器路徑
pub fn ensure_distinct_mount_points(
    config: &EffectiveConfig,
    source_directory: &Path,
) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    seen.insert(CONTAINER_SOURCE_DIRECTORY, source_directory);

    let mounts = config
        .packages
        .iter()
        .map(|p| (p.container_path.as_str(), p.host_path.as_path()))
        .chain(
            config
                .volumes
                .iter()
                .map(|v| (v.container_path.trim_end_matches('/'), v.host_path.as_path())),
        );

    for (container_path, host_path) in mounts {
        if let Some(first) = seen.insert(container_path, host_path) {
            return Err(PydevError::DuplicateMount {
                container_path: container_path.to_string(),
                first: first.to_path_buf(),
                second: host_path.to_path_buf(),
            });
        }
    }

    Ok(())
}
