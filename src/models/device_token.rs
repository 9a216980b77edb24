//! 设备推送令牌模型

use crate::errors::AppError;
use crate::utils::null_as_empty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const TOKEN_MISSING: &str = "Token missing";

/// 设备推送令牌（以令牌值为标识）
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct DeviceToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 注册 / 取消订阅请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub token: String,
}

impl TokenRequest {
    /// 校验并取出令牌值
    pub fn into_token(self) -> Result<String, AppError> {
        self.validate()
            .map_err(|_| AppError::ValidationError(TOKEN_MISSING.to_string()))?;
        Ok(self.token)
    }
}
