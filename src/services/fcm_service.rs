//! Firebase Cloud Messaging 推送服务
//!
//! 通过 FCM HTTP v1 接口逐令牌发送，并发执行后按输入顺序汇总结果。

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{MulticastResult, PushNotification, SendResponse};
use crate::security::{ServiceAccountKey, FCM_SCOPE};
use crate::services::PushGateway;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// 单次多播的令牌上限
pub const MULTICAST_BATCH_SIZE: usize = 500;

/// 访问令牌提前刷新的余量（秒）
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// 表示令牌本身无效的 FCM 错误码
const INVALID_TOKEN_CODES: &[&str] = &[
    "UNREGISTERED",
    "INVALID_ARGUMENT",
    "SENDER_ID_MISMATCH",
    "NOT_FOUND",
];

#[derive(Serialize)]
struct FcmRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: &'a HashMap<String, String>,
}

#[derive(Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct FcmSendResponse {
    name: String,
}

#[derive(Deserialize)]
struct FcmErrorEnvelope {
    error: FcmErrorBody,
}

#[derive(Deserialize)]
struct FcmErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<FcmErrorDetail>,
}

#[derive(Deserialize)]
struct FcmErrorDetail {
    #[serde(rename = "errorCode", default)]
    error_code: Option<String>,
}

#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at - ChronoDuration::seconds(TOKEN_REFRESH_MARGIN_SECS) > Utc::now()
    }
}

/// FCM 推送网关
pub struct FcmPushGateway {
    client: reqwest::Client,
    key: ServiceAccountKey,
    send_url: String,
    batch_size: usize,
    access_token: RwLock<Option<CachedToken>>,
}

impl FcmPushGateway {
    /// 创建 FCM 推送网关（解析服务账号凭据）
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let key = ServiceAccountKey::resolve(settings)?;
        Self::with_key(settings, key)
    }

    /// 使用已解析的服务账号创建
    pub fn with_key(settings: &Settings, key: ServiceAccountKey) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.push.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::InternalError(format!("创建 HTTP 客户端失败: {}", e)))?;

        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            settings.push.endpoint.trim_end_matches('/'),
            key.project_id
        );

        tracing::info!(project_id = %key.project_id, "FCM 推送网关已初始化");

        Ok(Self {
            client,
            key,
            send_url,
            batch_size: MULTICAST_BATCH_SIZE,
            access_token: RwLock::new(None),
        })
    }

    /// 获取 OAuth2 访问令牌（带进程内缓存）
    async fn access_token(&self) -> Result<String, AppError> {
        if let Some(cached) = self.access_token.read().await.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.value.clone());
            }
        }

        let mut guard = self.access_token.write().await;
        // 可能已被其他请求刷新
        if let Some(cached) = guard.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.value.clone());
            }
        }

        let assertion = self.key.sign_assertion(FCM_SCOPE)?;
        let response: OAuthTokenResponse = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(expires_in = response.expires_in, "已获取 FCM 访问令牌");

        let value = response.access_token.clone();
        *guard = Some(CachedToken {
            value: response.access_token,
            expires_at: Utc::now() + ChronoDuration::seconds(response.expires_in),
        });

        Ok(value)
    }

    /// 访问令牌被拒绝时丢弃缓存，下次调用重新换取
    async fn invalidate_access_token(&self, rejected: &str) {
        let mut guard = self.access_token.write().await;
        if guard.as_ref().is_some_and(|cached| cached.value == rejected) {
            *guard = None;
            tracing::warn!("FCM 拒绝了缓存的访问令牌，已清除");
        }
    }

    /// 向单个令牌发送
    async fn send_one(
        &self,
        access_token: &str,
        token: &str,
        notification: &PushNotification,
    ) -> SendResponse {
        let result = self
            .client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&build_request(token, notification))
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return SendResponse::unavailable(token, e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            return match response.json::<FcmSendResponse>().await {
                Ok(body) => SendResponse::delivered(token, body.name),
                Err(e) => SendResponse::unavailable(token, format!("响应解析失败: {}", e)),
            };
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.invalidate_access_token(access_token).await;
        }

        let body = response.text().await.unwrap_or_default();
        let code = classify_error(status.as_u16(), &body);

        if is_invalid_token(status.as_u16(), &code) {
            SendResponse::failed(token, code)
        } else {
            SendResponse::unavailable(token, code)
        }
    }
}

#[async_trait::async_trait]
impl PushGateway for FcmPushGateway {
    async fn send_multicast(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> Result<MulticastResult, AppError> {
        if tokens.is_empty() {
            return Ok(MulticastResult::default());
        }

        let access_token = self.access_token().await?;
        let mut responses = Vec::with_capacity(tokens.len());

        for batch in tokens.chunks(self.batch_size) {
            let futures: Vec<_> = batch
                .iter()
                .map(|token| self.send_one(&access_token, token, notification))
                .collect();

            responses.extend(futures::future::join_all(futures).await);
        }

        let result = MulticastResult::new(responses);

        if result.is_outage() {
            let reason = result
                .responses
                .iter()
                .find(|r| r.retryable)
                .and_then(|r| r.error.clone())
                .unwrap_or_default();
            return Err(AppError::PushError(format!("FCM 不可用: {}", reason)));
        }

        tracing::info!(
            total = tokens.len(),
            success = result.success_count(),
            failure = result.failure_count(),
            retryable = result.retryable_count(),
            "FCM 多播发送完成"
        );

        Ok(result)
    }
}

fn build_request<'a>(token: &'a str, notification: &'a PushNotification) -> FcmRequest<'a> {
    FcmRequest {
        message: FcmMessage {
            token,
            notification: FcmNotification {
                title: &notification.title,
                body: &notification.body,
            },
            data: &notification.data,
        },
    }
}

/// 404 或令牌类错误码表示令牌失效，其余（401/403/429/5xx 等）属于服务侧失败
fn is_invalid_token(status: u16, code: &str) -> bool {
    status == 404 || INVALID_TOKEN_CODES.contains(&code)
}

/// 从 FCM 错误响应中提取错误码，优先使用 FcmError.errorCode
fn classify_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<FcmErrorEnvelope>(body) {
        Ok(envelope) => envelope
            .error
            .details
            .into_iter()
            .find_map(|d| d.error_code)
            .or(envelope.error.status)
            .unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}", status),
    }
}
