//! 预警业务服务

use crate::errors::AppError;
use crate::models::{Alert, NewAlert, PushNotification, SendAlertOutcome};
use crate::repositories::{AlertLog, TokenStore};
use crate::services::PushGateway;
use std::sync::Arc;

/// 预警业务服务
pub struct AlertService {
    alert_log: Arc<dyn AlertLog>,
    token_store: Arc<dyn TokenStore>,
    push_gateway: Arc<dyn PushGateway>,
}

impl AlertService {
    pub fn new(
        alert_log: Arc<dyn AlertLog>,
        token_store: Arc<dyn TokenStore>,
        push_gateway: Arc<dyn PushGateway>,
    ) -> Self {
        Self {
            alert_log,
            token_store,
            push_gateway,
        }
    }

    /// 发送预警：写入日志 → 读取令牌快照 → 多播推送 → 清理失效令牌
    ///
    /// 预警写入后即视为发送成功，单个令牌的推送失败不影响结果；
    /// 推送整体失败时返回错误，但已写入的预警不回滚。
    pub async fn send_alert(&self, new_alert: NewAlert) -> Result<SendAlertOutcome, AppError> {
        let alert = self.alert_log.append(&new_alert).await?;

        tracing::info!(
            alert_id = %alert.id,
            alert_type = %alert.alert_type,
            reporter = %alert.name,
            "预警已记录"
        );

        // 快照读取，不加锁；并发注册的令牌可能收不到本次推送
        let tokens = self.token_store.list_all().await?;

        if tokens.is_empty() {
            tracing::info!(alert_id = %alert.id, "没有已注册的设备，跳过推送");
            return Ok(SendAlertOutcome {
                alert,
                delivered: 0,
                pruned: 0,
            });
        }

        let notification = PushNotification::from(&alert);
        let result = self
            .push_gateway
            .send_multicast(&tokens, &notification)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, alert_id = %alert.id, "推送调用失败");
                e
            })?;

        // 只清理被判定为失效的令牌，服务侧的临时失败保留令牌
        let invalid = result.invalid_tokens();
        let pruned = self.prune_tokens(&invalid).await;

        tracing::info!(
            alert_id = %alert.id,
            tokens = tokens.len(),
            delivered = result.success_count(),
            failed = result.failure_count(),
            retryable = result.retryable_count(),
            pruned = pruned,
            "预警推送完成"
        );

        Ok(SendAlertOutcome {
            delivered: result.success_count(),
            pruned,
            alert,
        })
    }

    /// 删除失效的令牌，尽力而为，返回成功删除的数量
    async fn prune_tokens(&self, failed: &[&str]) -> usize {
        if failed.is_empty() {
            return 0;
        }

        let futures: Vec<_> = failed
            .iter()
            .map(|token| self.token_store.delete(token))
            .collect();

        let results = futures::future::join_all(futures).await;

        let mut pruned = 0;
        for (token, result) in failed.iter().zip(results) {
            match result {
                Ok(()) => {
                    pruned += 1;
                    tracing::debug!(token = %token, "已移除失效令牌");
                }
                Err(e) => {
                    tracing::warn!(error = %e, token = %token, "移除失效令牌失败");
                }
            }
        }

        pruned
    }

    /// 全部预警，最新的在前
    pub async fn list(&self) -> Result<Vec<Alert>, AppError> {
        self.alert_log.list_desc().await
    }

    /// 清空全部预警
    pub async fn clear(&self) -> Result<u64, AppError> {
        let deleted = self.alert_log.clear().await?;
        tracing::info!(deleted = deleted, "预警已清空");
        Ok(deleted)
    }
}
