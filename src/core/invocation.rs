use crate::core::mounts::MountPlanner;
use crate::domain::model::{
    CommandMode, EffectiveConfig, Invocation, LaunchRequest, VolumeMode,
    CONTAINER_SOURCE_DIRECTORY,
};
use crate::utils::validation::RESERVED_ENVIRONMENT_KEY;
use std::path::Path;

/// Shell used to interpret the command in `run` mode.
const RUN_SHELL: &str = "sh";

pub struct InvocationBuilder<'a> {
    program: &'a str,
    config: &'a EffectiveConfig,
}

impl<'a> InvocationBuilder<'a> {
    pub fn new(program: &'a str, config: &'a EffectiveConfig) -> Self {
        Self { program, config }
    }

    pub fn build(&self, request: &LaunchRequest) -> Invocation {
        let config = self.config;
        let mut args = vec!["run".to_string()];

        if request.remove_container {
            args.push("--rm".to_string());
        }

        // 1. 原始碼目錄
        push_volume(
            &mut args,
            &request.source_directory,
            CONTAINER_SOURCE_DIRECTORY,
            VolumeMode::Rw,
        );

        // 2. python 套件
        for package in &config.packages {
            push_volume(&mut args, &package.host_path, &package.container_path, VolumeMode::Rw);
        }

        // 3. docker_options.volumes
        for volume in &config.volumes {
            push_volume(&mut args, &volume.host_path, &volume.container_path, volume.mode);
        }

        // 4. ports
        for port in &config.ports {
            args.push("-p".to_string());
            args.push(format!("{}:{}", port.host_port, port.container_port));
        }

        // 5. 沒設定 network 時使用預設 bridge
        if let Some(network) = &config.network {
            args.push("--network".to_string());
            args.push(network.clone());
        }

        // 6. PYTHONPATH 放最後，避免被覆蓋
        for (key, value) in &config.environment {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        if !config.packages.is_empty() {
            let pythonpath = MountPlanner::new(&config.container_directory, config.platform)
                .pythonpath(&config.packages);
            args.push("-e".to_string());
            args.push(format!("{RESERVED_ENVIRONMENT_KEY}={pythonpath}"));
        }

        // 7. TTY
        if request.mode.is_interactive() {
            args.push("-i".to_string());
            args.push("-t".to_string());
        }

        // 8. image
        args.push(request.image.clone());

        // 9. command
        match &request.mode {
            CommandMode::Run { command } => {
                args.push(RUN_SHELL.to_string());
                args.push("-c".to_string());
                args.push(command.clone());
            }
            CommandMode::RunPty { shell } => args.push(shell.clone()),
        }

        Invocation::new(self.program.to_string(), args, request.mode.is_interactive())
    }
}

fn push_volume(args: &mut Vec<String>, host: &Path, container: &str, mode: VolumeMode) {
    args.push("-v".to_string());
    args.push(format!("{}:{}:{}", host.display(), container, mode));
}
