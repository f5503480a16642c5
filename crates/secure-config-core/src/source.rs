use async_trait::async_trait;

use crate::{ProtectedConfig, Result};

/// Anything that can produce the protected configuration for the view.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch_config(&self) -> Result<ProtectedConfig>;
}
