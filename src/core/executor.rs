use crate::domain::model::Invocation;
use crate::domain::ports::ContainerRuntime;
use crate::utils::error::{PydevError, Result};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Runs invocations through a docker compatible CLI binary.
#[derive(Debug, Clone, Default)]
pub struct DockerCli;

impl DockerCli {
    pub fn new() -> Self {
        Self
    }

    // inspect 成功即代表物件存在，輸出直接丟棄
    async fn inspect(&self, program: &str, args: &[&str]) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| PydevError::RuntimeUnavailable {
                program: program.to_string(),
                source: e,
            })?;

        tracing::debug!("{} {} -> {}", program, args.join(" "), status);
        Ok(status.success())
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn execute(&self, invocation: &Invocation) -> Result<i32> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args());

        // 互動模式需要接上呼叫端的終端機；一次性執行只串流輸出
        if invocation.is_interactive() {
            cmd.stdin(Stdio::inherit());
        } else {
            cmd.stdin(Stdio::null());
        }
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        tracing::info!("🐳 Starting container: {}", invocation.command_line());

        let mut child = cmd.spawn().map_err(|e| PydevError::RuntimeUnavailable {
            program: invocation.program().to_string(),
            source: e,
        })?;

        // Ctrl-C 會由同一個終端機送給子程序，這裡只等它自己結束，
        // 讓回傳的是容器執行環境真正的退出碼
        let status = loop {
            tokio::select! {
                status = child.wait() => break status?,
                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        tracing::warn!("Unable to listen for interrupts: {}", e);
                        break child.wait().await?;
                    }
                    tracing::debug!(
                        "Interrupt received, waiting for the container runtime to exit"
                    );
                }
            }
        };

        let code = exit_code(status);
        tracing::info!("Container runtime exited with code {}", code);
        Ok(code)
    }

    async fn image_exists(&self, program: &str, image: &str) -> Result<bool> {
        self.inspect(program, &["image", "inspect", image]).await
    }

    async fn network_exists(&self, program: &str, network: &str) -> Result<bool> {
        self.inspect(program, &["network", "inspect", network]).await
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
