use crate::domain::model::{EffectiveConfig, Invocation, LaunchRequest};
use crate::domain::ports::ContainerRuntime;
use crate::utils::error::{PydevError, Result};

pub struct Launcher<R: ContainerRuntime> {
    runtime: R,
}

impl<R: ContainerRuntime> Launcher<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// 確認 image 與 network 存在後才啟動容器，回傳執行環境的退出碼，不做任何轉譯
    pub async fn launch(
        &self,
        request: &LaunchRequest,
        config: &EffectiveConfig,
        invocation: &Invocation,
    ) -> Result<i32> {
        self.verify(invocation.program(), request, config).await?;

        if invocation.is_interactive() {
            tracing::info!("Attaching interactive session");
        }

        let code = self.runtime.execute(invocation).await?;
        if code != 0 {
            tracing::warn!("Container exited with non-zero status {}", code);
        }
        Ok(code)
    }

    async fn verify(
        &self,
        program: &str,
        request: &LaunchRequest,
        config: &EffectiveConfig,
    ) -> Result<()> {
        if !self.runtime.image_exists(program, &request.image).await? {
            return Err(PydevError::InvalidImage {
                image: request.image.clone(),
            });
        }

        if let Some(network) = &config.network {
            if !self.runtime.network_exists(program, network).await? {
                return Err(PydevError::InvalidNetwork {
                    network: network.clone(),
                });
            }
        }

        tracing::debug!("✅ Image {} is available", request.image);
        Ok(())
    }
}
