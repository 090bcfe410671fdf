use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CONTAINER_DIRECTORY: &str = "/pypath";
pub const CONTAINER_SOURCE_DIRECTORY: &str = "/src";
pub const DEFAULT_PTY_SHELL: &str = "/bin/bash";
pub const DEFAULT_RUNTIME: &str = "docker";

/// 套件路徑的來源，只用於錯誤訊息與日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Cli,
    Config,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Cli => write!(f, "from command line"),
            Provenance::Config => write!(f, "from config file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub raw: String,
    pub provenance: Provenance,
}

impl PackageReference {
    pub fn cli(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            provenance: Provenance::Cli,
        }
    }

    pub fn config(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            provenance: Provenance::Config,
        }
    }
}

/// A python package that has been validated on the host and assigned a mount point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub host_path: PathBuf,
    pub container_path: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host_port: u16,
    pub container_port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeMode {
    Ro,
    #[default]
    Rw,
}

impl VolumeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeMode::Ro => "ro",
            VolumeMode::Rw => "rw",
        }
    }
}

impl fmt::Display for VolumeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMapping {
    pub host_path: PathBuf,
    pub container_path: String,
    pub mode: VolumeMode,
}

/// 容器的目標平台，決定 PYTHONPATH 的分隔符號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TargetPlatform {
    #[default]
    Linux,
    Windows,
}

impl TargetPlatform {
    pub fn path_list_separator(&self) -> char {
        match self {
            TargetPlatform::Linux => ':',
            TargetPlatform::Windows => ';',
        }
    }
}

/// The fully merged configuration for one invocation. Built once by the
/// config merger and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub container_directory: String,
    pub packages: Vec<ResolvedPackage>,
    pub environment: BTreeMap<String, String>,
    pub network: Option<String>,
    pub ports: Vec<PortMapping>,
    pub volumes: Vec<VolumeMapping>,
    pub platform: TargetPlatform,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            container_directory: DEFAULT_CONTAINER_DIRECTORY.to_string(),
            packages: Vec::new(),
            environment: BTreeMap::new(),
            network: None,
            ports: Vec::new(),
            volumes: Vec::new(),
            platform: TargetPlatform::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandMode {
    /// 一次性執行指令，透過 shell 解析
    Run { command: String },
    /// 互動式 shell，配置 TTY
    RunPty { shell: String },
}

impl CommandMode {
    pub fn is_interactive(&self) -> bool {
        matches!(self, CommandMode::RunPty { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub image: String,
    pub mode: CommandMode,
    pub source_directory: PathBuf,
    pub remove_container: bool,
}

/// The argument vector handed to the container runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    interactive: bool,
}

impl Invocation {
    pub(crate) fn new(program: String, args: Vec<String>, interactive: bool) -> Self {
        Self {
            program,
            args,
            interactive,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// 可直接貼到 shell 執行的指令字串
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| shell_escape::escape(Cow::Borrowed(part)).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
