//! 设备令牌服务

use crate::errors::AppError;
use crate::repositories::TokenStore;
use std::sync::Arc;

/// 设备令牌服务
pub struct DeviceTokenService {
    token_store: Arc<dyn TokenStore>,
}

impl DeviceTokenService {
    pub fn new(token_store: Arc<dyn TokenStore>) -> Self {
        Self { token_store }
    }

    /// 注册令牌（幂等）
    pub async fn register(&self, token: &str) -> Result<(), AppError> {
        self.token_store.upsert(token).await?;
        tracing::debug!(token_prefix = %token_prefix(token), "设备令牌已注册");
        Ok(())
    }

    /// 取消订阅（令牌不存在时同样成功）
    pub async fn unsubscribe(&self, token: &str) -> Result<(), AppError> {
        self.token_store.delete(token).await?;
        tracing::debug!(token_prefix = %token_prefix(token), "设备令牌已移除");
        Ok(())
    }
}

/// 日志中只记录令牌前缀
fn token_prefix(token: &str) -> &str {
    match token.char_indices().nth(12) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}
