use crate::utils::error::{PydevError, Result};
use crate::utils::validation::{
    validate_container_path, validate_environment_key, validate_non_empty_string, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YamlConfig {
    pub python_packages: Option<PythonPackagesConfig>,
    pub docker_options: Option<DockerOptionsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PythonPackagesConfig {
    pub container_directory: Option<String>,
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerOptionsConfig {
    pub environment: Option<EnvironmentConfig>,
    pub network: Option<String>,
    #[serde(default)]
    pub ports: Vec<PortEntry>,
    #[serde(default)]
    pub volumes: Vec<String>,
}

/// docker-compose 允許 mapping 或 `KEY=VALUE` 清單兩種寫法
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvironmentConfig {
    Map(BTreeMap<String, serde_yaml::Value>),
    List(Vec<String>),
}

/// `- 8080` 與 `- "80:8080"` 都是合法的 port 寫法
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortEntry {
    Number(u64),
    Text(String),
}

impl PortEntry {
    pub fn as_spec(&self) -> String {
        match self {
            PortEntry::Number(n) => n.to_string(),
            PortEntry::Text(s) => s.clone(),
        }
    }
}

impl EnvironmentConfig {
    /// 轉成 (key, value) 清單。沒有值的 key 會從目前的環境帶入，
    /// 環境中也沒有時略過。每個 key 都會先檢查，包含沒有值的 key
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        self.entries_with(|name| std::env::var(name).ok())
    }

    pub fn entries_with<F>(&self, lookup: F) -> Result<Vec<(String, String)>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut entries = Vec::new();

        let push_passthrough = |key: &str, entries: &mut Vec<(String, String)>| {
            match lookup(key) {
                Some(value) => entries.push((key.to_string(), value)),
                None => tracing::warn!(
                    "Environment variable {} has no value and is not set on the host, skipping",
                    key
                ),
            }
        };

        match self {
            EnvironmentConfig::Map(map) => {
                for (key, value) in map {
                    validate_environment_key(key)?;
                    match value {
                        serde_yaml::Value::Null => push_passthrough(key, &mut entries),
                        serde_yaml::Value::String(s) => entries.push((key.clone(), s.clone())),
                        serde_yaml::Value::Number(n) => entries.push((key.clone(), n.to_string())),
                        serde_yaml::Value::Bool(b) => entries.push((key.clone(), b.to_string())),
                        _ => {
                            return Err(PydevError::config_parse(format!(
                                "docker_options.environment.{key} must be a string, number or boolean"
                            )))
                        }
                    }
                }
            }
            EnvironmentConfig::List(list) => {
                for item in list {
                    let (key, value) = match item.split_once('=') {
                        Some((key, value)) => (key, Some(value)),
                        None => (item.as_str(), None),
                    };
                    validate_environment_key(key)?;
                    match value {
                        Some(value) => entries.push((key.to_string(), value.to_string())),
                        None => push_passthrough(key, &mut entries),
                    }
                }
            }
        }

        Ok(entries)
    }
}

impl YamlConfig {
    /// 從 YAML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PydevError::config_parse(format!(
                "unable to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// 從 YAML 字串解析配置
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| PydevError::config_parse(format!("YAML parsing error: {e}")))?;

        match value {
            serde_yaml::Value::Null => Err(PydevError::config_parse("config file is empty")),
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map_err(|e| PydevError::config_parse(format!("invalid config structure: {e}"))),
            _ => Err(PydevError::config_parse(
                "the top level of the config file must be a mapping",
            )),
        }
    }

    pub fn container_directory(&self) -> Option<&str> {
        self.python_packages
            .as_ref()
            .and_then(|p| p.container_directory.as_deref())
    }

    pub fn package_paths(&self) -> &[String] {
        self.python_packages
            .as_ref()
            .map(|p| p.paths.as_slice())
            .unwrap_or(&[])
    }

    pub fn network(&self) -> Option<&str> {
        self.docker_options.as_ref().and_then(|d| d.network.as_deref())
    }

    pub fn ports(&self) -> &[PortEntry] {
        self.docker_options
            .as_ref()
            .map(|d| d.ports.as_slice())
            .unwrap_or(&[])
    }

    pub fn volumes(&self) -> &[String] {
        self.docker_options
            .as_ref()
            .map(|d| d.volumes.as_slice())
            .unwrap_or(&[])
    }

    pub fn environment(&self) -> Option<&EnvironmentConfig> {
        self.docker_options.as_ref().and_then(|d| d.environment.as_ref())
    }
}

impl Validate for YamlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = self.container_directory() {
            validate_container_path("python_packages.container_directory", dir)?;
        }

        for path in self.package_paths() {
            validate_non_empty_string("python_packages.paths", path)?;
        }

        if let Some(network) = self.network() {
            validate_non_empty_string("docker_options.network", network)?;
        }

        Ok(())
    }
}
