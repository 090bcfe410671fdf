use crate::config::merge::{CliInputs, ConfigMerger};
use crate::config::yaml_config::YamlConfig;
use crate::config::{CliConfig, RunCommand};
use crate::core::invocation::InvocationBuilder;
use crate::core::resolver::PathResolver;
use crate::domain::model::{CommandMode, EffectiveConfig, Invocation, LaunchRequest};
use crate::utils::error::Result;

/// Everything needed to start the container, computed before anything is spawned.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub config: EffectiveConfig,
    pub request: LaunchRequest,
    pub invocation: Invocation,
}

impl CliConfig {
    pub fn image(&self) -> &str {
        match &self.command {
            RunCommand::Run { image, .. } | RunCommand::RunPty { image, .. } => image,
        }
    }

    pub fn directory(&self) -> &str {
        match &self.command {
            RunCommand::Run { directory, .. } | RunCommand::RunPty { directory, .. } => directory,
        }
    }

    pub fn command_mode(&self) -> CommandMode {
        match &self.command {
            RunCommand::Run { command, .. } => CommandMode::Run {
                command: command.clone(),
            },
            RunCommand::RunPty { shell, .. } => CommandMode::RunPty {
                shell: shell.clone(),
            },
        }
    }

    pub fn load_config_file(&self) -> Result<Option<YamlConfig>> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                YamlConfig::from_file(path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// 解析所有輸入並組出容器指令；任何錯誤都會在啟動容器前回傳
    pub fn plan(&self, resolver: &PathResolver) -> Result<LaunchPlan> {
        crate::utils::validation::validate_non_empty_string("image", self.image())?;

        let file = self.load_config_file()?;
        let source_directory = resolver.resolve_directory(self.directory())?;

        let inputs = CliInputs {
            packages: self.py_packages.clone(),
            container_directory: self.container_directory.clone(),
            source_directory: source_directory.clone(),
        };
        let config = ConfigMerger::new(resolver)
            .with_platform(self.target_platform)
            .merge(&inputs, file.as_ref())?;

        let request = LaunchRequest {
            image: self.image().to_string(),
            mode: self.command_mode(),
            source_directory,
            remove_container: !self.keep,
        };
        let invocation = InvocationBuilder::new(&self.runtime, &config).build(&request);

        Ok(LaunchPlan {
            config,
            request,
            invocation,
        })
    }
}
