pub mod executor;
pub mod invocation;
pub mod launcher;
pub mod mounts;
pub mod resolver;
pub mod shorthand;

pub use crate::domain::model::{EffectiveConfig, Invocation, LaunchRequest};
pub use crate::domain::ports::ContainerRuntime;
pub use crate::utils::error::Result;
