#[cfg(feature = "cli")]
pub mod cli;
pub mod merge;
pub mod yaml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{TargetPlatform, DEFAULT_PTY_SHELL, DEFAULT_RUNTIME};
#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pydev-docker")]
#[command(version, about = "Run commands in a docker container with local python packages mounted")]
#[command(after_help = "EXAMPLES:\n    \
    pydev-docker -p ~/Projects/NetworkPackage run py3_dev \"python3 setup.py test\"\n    \
    pydev-docker -c pydev.yml run_pty py3_dev")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: RunCommand,

    /// Python package directory to mount and add to PYTHONPATH (repeatable)
    #[arg(short = 'p', long = "py-package", value_name = "PATH", global = true)]
    pub py_packages: Vec<String>,

    /// YAML config file with python_packages and docker_options sections
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Directory in the container where python packages are mounted [default: /pypath]
    #[arg(long, value_name = "DIR", global = true)]
    pub container_directory: Option<String>,

    /// Keep the container after it exits instead of removing it
    #[arg(long, global = true)]
    pub keep: bool,

    /// Operating system inside the image; selects the PYTHONPATH separator
    #[arg(long, value_enum, default_value_t = TargetPlatform::Linux, global = true)]
    pub target_platform: TargetPlatform,

    /// Container runtime binary
    #[arg(long, env = "PYDEV_DOCKER_RUNTIME", default_value = DEFAULT_RUNTIME, global = true)]
    pub runtime: String,

    /// Print the container command instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// More logging; -v for info, -vv for debug
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum RunCommand {
    /// Create a container and run a command
    Run {
        /// The docker image to use
        image: String,

        /// The command to run, interpreted by sh -c
        command: String,

        /// Directory mounted as the source at /src
        #[arg(default_value = ".")]
        directory: String,
    },

    /// Create a container and spawn an interactive shell
    #[command(name = "run_pty")]
    RunPty {
        /// The shell to start
        #[arg(long, default_value = DEFAULT_PTY_SHELL)]
        shell: String,

        /// The docker image to use
        image: String,

        /// Directory mounted as the source at /src
        #[arg(default_value = ".")]
        directory: String,
    },
}
