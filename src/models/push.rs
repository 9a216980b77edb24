//! 推送通知模型

use super::{Alert, AlertType};
use serde::Serialize;
use std::collections::HashMap;

pub const LOCKDOWN_TITLE: &str = "Lockdown Alert!";
pub const SUSPICIOUS_TITLE: &str = "Suspicious Alert";
pub const LOCKDOWN_BODY: &str =
    "This is a Lockdown. Please follow the Lockdown Procedure Immediately.";

/// 推送通知内容
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    /// 附加数据，客户端据此选择提示音等
    pub data: HashMap<String, String>,
}

impl PushNotification {
    /// 根据预警构建通知
    ///
    /// 封锁预警使用固定标题和正文，忽略上报内容；可疑活动预警透传上报内容。
    pub fn for_alert(alert_type: AlertType, message: &str) -> Self {
        let (title, body) = match alert_type {
            AlertType::Panic => (LOCKDOWN_TITLE, LOCKDOWN_BODY),
            AlertType::Suspicious => (SUSPICIOUS_TITLE, message),
        };

        let mut data = HashMap::new();
        data.insert("type".to_string(), alert_type.as_str().to_string());

        Self {
            title: title.to_string(),
            body: body.to_string(),
            data,
        }
    }
}

impl From<&Alert> for PushNotification {
    fn from(alert: &Alert) -> Self {
        Self::for_alert(alert.alert_type, &alert.message)
    }
}

/// 单个令牌的发送结果
///
/// `retryable` 为 true 表示失败来自推送服务本身（网络、鉴权、限流、5xx），
/// 与令牌是否有效无关，这类令牌不应被清理。
#[derive(Debug, Clone, PartialEq)]
pub struct SendResponse {
    pub token: String,
    pub message_id: Option<String>,
    pub error: Option<String>,
    pub retryable: bool,
}

impl SendResponse {
    pub fn delivered(token: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message_id: Some(message_id.into()),
            error: None,
            retryable: false,
        }
    }

    /// 令牌本身被拒绝（未注册、格式无效等）
    pub fn failed(token: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message_id: None,
            error: Some(error.into()),
            retryable: false,
        }
    }

    /// 推送服务暂不可用
    pub fn unavailable(token: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            retryable: true,
            ..Self::failed(token, error)
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 多播发送结果，顺序与输入令牌一致
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MulticastResult {
    pub responses: Vec<SendResponse>,
}

impl MulticastResult {
    pub fn new(responses: Vec<SendResponse>) -> Self {
        Self { responses }
    }

    pub fn success_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.responses.len() - self.success_count()
    }

    /// 被推送服务判定为失效的令牌（不含可重试的失败）
    pub fn invalid_tokens(&self) -> Vec<&str> {
        self.responses
            .iter()
            .filter(|r| !r.is_success() && !r.retryable)
            .map(|r| r.token.as_str())
            .collect()
    }

    pub fn retryable_count(&self) -> usize {
        self.responses.iter().filter(|r| r.retryable).count()
    }

    /// 没有任何送达且存在服务侧失败，视为整次调用失败
    pub fn is_outage(&self) -> bool {
        self.success_count() == 0 && self.retryable_count() > 0
    }
}
