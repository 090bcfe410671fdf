use std::path::PathBuf;
use thiserror::Error;

/// 設定或解析失敗時的退出碼 (sysexits EX_USAGE)，與容器內部的退出碼區隔
pub const CONFIG_ERROR_EXIT_CODE: i32 = 64;

/// 找不到容器執行環境時的退出碼，沿用 shell 的慣例
pub const RUNTIME_UNAVAILABLE_EXIT_CODE: i32 = 127;

#[derive(Error, Debug)]
pub enum PydevError {
    #[error("Config parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid python package '{path}' ({origin}): {reason}")]
    InvalidPackage {
        path: String,
        origin: String,
        reason: String,
    },

    #[error("Invalid directory '{path}': {reason}")]
    InvalidDirectory { path: String, reason: String },

    #[error(
        "Duplicate mount point '{container_path}': both '{}' and '{}' would be mounted there",
        .first.display(),
        .second.display()
    )]
    DuplicateMount {
        container_path: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid port spec '{spec}': {reason}")]
    InvalidPortSpec { spec: String, reason: String },

    #[error("Invalid volume spec '{spec}': {reason}")]
    InvalidVolumeSpec { spec: String, reason: String },

    #[error("Environment variable '{key}' is reserved and is set automatically")]
    ReservedEnvironmentKey { key: String },

    #[error("Image '{image}' was not found by the container runtime")]
    InvalidImage { image: String },

    #[error("Network '{network}' was not found by the container runtime")]
    InvalidNetwork { network: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to start container runtime '{program}': {source}")]
    RuntimeUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 容器啟動前的輸入錯誤
    Configuration,
    /// 容器執行環境本身的錯誤
    Runtime,
}

impl PydevError {
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RuntimeUnavailable { .. } => ErrorCategory::Runtime,
            _ => ErrorCategory::Configuration,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => CONFIG_ERROR_EXIT_CODE,
            ErrorCategory::Runtime => RUNTIME_UNAVAILABLE_EXIT_CODE,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigParse { .. } => {
                "Check the YAML layout: only python_packages and docker_options are supported"
            }
            Self::InvalidPackage { .. } => {
                "Point the path at a directory that directly contains an __init__.py file"
            }
            Self::InvalidDirectory { .. } => "Make sure the source directory exists",
            Self::DuplicateMount { .. } => {
                "Rename one of the directories or mount it via docker_options.volumes instead"
            }
            Self::InvalidPortSpec { .. } => "Use HOST_PORT or HOST_PORT:CONTAINER_PORT (1-65535)",
            Self::InvalidVolumeSpec { .. } => {
                "Use HOST:CONTAINER or HOST:CONTAINER:MODE where MODE is ro or rw"
            }
            Self::ReservedEnvironmentKey { .. } => {
                "Remove PYTHONPATH from docker_options.environment; use python_packages.paths"
            }
            Self::InvalidImage { .. } => "Pull or build the image first, e.g. docker pull <image>",
            Self::InvalidNetwork { .. } => {
                "Create the network with docker network create or fix docker_options.network"
            }
            Self::IoError(_) => "Check file permissions and that the file exists",
            Self::RuntimeUnavailable { .. } => {
                "Install docker or pass --runtime with a compatible binary"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PydevError>;
