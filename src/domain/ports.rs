use crate::domain::model::Invocation;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 執行已組好的容器指令，回傳容器執行環境的退出碼
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn execute(&self, invocation: &Invocation) -> Result<i32>;

    async fn image_exists(&self, program: &str, image: &str) -> Result<bool>;

    /// 名稱或 ID 皆可
    async fn network_exists(&self, program: &str, network: &str) -> Result<bool>;
}
