//! Mock 对象

use chrono::{Duration, Utc};
use els_relay::errors::AppError;
use els_relay::models::{Alert, MulticastResult, NewAlert, PushNotification, SendResponse};
use els_relay::repositories::{AlertLog, TokenStore};
use els_relay::services::PushGateway;
use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

fn store_unavailable() -> AppError {
    AppError::InternalError("store unavailable".to_string())
}

/// 内存令牌库
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<BTreeSet<String>>,
    fail_writes: AtomicBool,
    fail_deletes_for: Mutex<HashSet<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.lock().unwrap().contains(token)
    }

    /// 所有写操作返回错误
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 删除指定令牌时返回错误
    pub fn fail_delete_for(&self, token: &str) {
        self.fail_deletes_for.lock().unwrap().insert(token.to_string());
    }
}

#[async_trait::async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn upsert(&self, token: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }
        self.tokens.lock().unwrap().insert(token.to_string());
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst)
            || self.fail_deletes_for.lock().unwrap().contains(token)
        {
            return Err(store_unavailable());
        }
        self.tokens.lock().unwrap().remove(token);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<String>, AppError> {
        Ok(self.tokens())
    }
}

/// 内存预警日志
#[derive(Debug, Default)]
pub struct InMemoryAlertLog {
    alerts: Mutex<Vec<Alert>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryAlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl AlertLog for InMemoryAlertLog {
    async fn append(&self, alert: &NewAlert) -> Result<Alert, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }

        let mut alerts = self.alerts.lock().unwrap();

        // 保证时间戳严格递增，避免同一时刻写入导致排序不确定
        let mut created_at = Utc::now();
        if let Some(last) = alerts.iter().map(|a| a.created_at).max() {
            if created_at <= last {
                created_at = last + Duration::microseconds(1);
            }
        }

        let stored = Alert {
            id: Uuid::new_v4(),
            name: alert.name.clone(),
            alert_type: alert.alert_type,
            message: alert.message.clone(),
            created_at,
        };
        alerts.push(stored.clone());
        Ok(stored)
    }

    async fn list_desc(&self) -> Result<Vec<Alert>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }
        let mut alerts = self.alerts.lock().unwrap().clone();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }
        let mut alerts = self.alerts.lock().unwrap();
        let deleted = alerts.len() as u64;
        alerts.clear();
        Ok(deleted)
    }
}

/// 可编排结果的推送网关，记录每次调用
#[derive(Debug, Default)]
pub struct ScriptedPushGateway {
    failing_tokens: Mutex<HashSet<String>>,
    unavailable_tokens: Mutex<HashSet<String>>,
    fail_call: AtomicBool,
    calls: Mutex<Vec<(Vec<String>, PushNotification)>>,
}

impl ScriptedPushGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定令牌的发送结果为失败
    pub fn fail_token(&self, token: &str) {
        self.failing_tokens.lock().unwrap().insert(token.to_string());
    }

    /// 指定令牌遇到推送服务侧的临时失败
    pub fn unavailable_token(&self, token: &str) {
        self.unavailable_tokens.lock().unwrap().insert(token.to_string());
    }

    /// 整次调用失败
    pub fn fail_call(&self, fail: bool) {
        self.fail_call.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(Vec<String>, PushNotification)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PushGateway for ScriptedPushGateway {
    async fn send_multicast(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> Result<MulticastResult, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((tokens.to_vec(), notification.clone()));

        if self.fail_call.load(Ordering::SeqCst) {
            return Err(AppError::PushError("gateway unreachable".to_string()));
        }

        let failing = self.failing_tokens.lock().unwrap();
        let unavailable = self.unavailable_tokens.lock().unwrap();
        Ok(MulticastResult::new(
            tokens
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    if failing.contains(t) {
                        SendResponse::failed(t.as_str(), "UNREGISTERED")
                    } else if unavailable.contains(t) {
                        SendResponse::unavailable(t.as_str(), "UNAVAILABLE")
                    } else {
                        SendResponse::delivered(t.as_str(), format!("projects/test/messages/{}", i))
                    }
                })
                .collect(),
        ))
    }
}
