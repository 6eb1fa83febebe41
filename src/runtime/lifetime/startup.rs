use crate::storage::Storage;
use crate::utils::{Clock, SystemClock};
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub clock: Arc<dyn Clock>,
}

/// 准备服务器启动的上下文
/// 包括存储连接、数据库迁移与时钟
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    StartupContext {
        storage,
        clock: Arc::new(SystemClock),
    }
}
