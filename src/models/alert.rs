//! 预警模型

use crate::errors::AppError;
use crate::utils::{iso8601, null_as_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// 预警类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "alert_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// 封锁（紧急）
    Panic,
    /// 可疑活动
    Suspicious,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Panic => "panic",
            AlertType::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "panic" => Ok(AlertType::Panic),
            "suspicious" => Ok(AlertType::Suspicious),
            _ => Err(AppError::ValidationError(INVALID_ALERT_TYPE.to_string())),
        }
    }
}

pub const MISSING_FIELDS: &str = "Missing fields";
pub const INVALID_ALERT_TYPE: &str = "Invalid alert type";

/// 预警记录
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    /// 上报人
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

/// 待写入的预警
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub name: String,
    pub alert_type: AlertType,
    pub message: String,
}

/// 发送预警请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendAlertRequest {
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub alert_type: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub message: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub name: String,
}

impl SendAlertRequest {
    /// 校验并转换为待写入的预警
    pub fn into_new_alert(self) -> Result<NewAlert, AppError> {
        self.validate()
            .map_err(|_| AppError::ValidationError(MISSING_FIELDS.to_string()))?;

        Ok(NewAlert {
            alert_type: self.alert_type.parse()?,
            name: self.name,
            message: self.message,
        })
    }
}

/// 发送预警结果
#[derive(Debug, Clone, Serialize)]
pub struct SendAlertOutcome {
    pub alert: Alert,
    pub delivered: usize,
    pub pruned: usize,
}
