//! 推送网关抽象

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{MulticastResult, PushNotification, SendResponse};
use crate::services::FcmPushGateway;
use std::sync::Arc;

/// 推送网关：一次调用向多个令牌发送同一通知，逐个令牌返回结果
///
/// 返回 `Err` 表示整次调用失败（无法获取访问令牌，或没有任何送达且推送服务侧出错），
/// 此时不应清理任何令牌；单个令牌的失败体现在 [`MulticastResult`] 中。
#[async_trait::async_trait]
pub trait PushGateway: Send + Sync {
    async fn send_multicast(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> Result<MulticastResult, AppError>;
}

/// 空推送网关，所有令牌视为送达（用于未配置凭据的本地开发）
#[derive(Debug, Default, Clone)]
pub struct NoopPushGateway;

#[async_trait::async_trait]
impl PushGateway for NoopPushGateway {
    async fn send_multicast(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> Result<MulticastResult, AppError> {
        tracing::debug!(
            tokens = tokens.len(),
            title = %notification.title,
            "推送已禁用，跳过发送"
        );

        Ok(MulticastResult::new(
            tokens
                .iter()
                .map(|t| SendResponse::delivered(t.as_str(), "noop"))
                .collect(),
        ))
    }
}

/// 根据配置构建推送网关
pub fn build_push_gateway(settings: &Settings) -> Result<Arc<dyn PushGateway>, AppError> {
    if !settings.push.enabled {
        tracing::warn!("推送已禁用，预警不会下发到设备");
        return Ok(Arc::new(NoopPushGateway));
    }

    Ok(Arc::new(FcmPushGateway::new(settings)?))
}
