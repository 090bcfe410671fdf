pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LaunchPlan, CliConfig};

pub use config::merge::{CliInputs, ConfigMerger};
pub use config::yaml_config::YamlConfig;
pub use core::{executor::DockerCli, launcher::Launcher, resolver::PathResolver};
pub use domain::model::{CommandMode, EffectiveConfig, Invocation, LaunchRequest};
pub use utils::error::{PydevError, Result};
