//! 统一错误类型定义

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 请求验证错误 (400)
    #[error("请求参数无效: {0}")]
    ValidationError(String),

    // 数据库错误 (500)
    #[error("数据库错误: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // 推送网关错误 (500)
    #[error("推送服务错误: {0}")]
    PushError(String),

    // 内部错误 (500)
    #[error("内部服务错误: {0}")]
    InternalError(String),

    // 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    // 上游失败，附带对外暴露的固定提示
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// 用接口对外的固定提示包装上游错误
    ///
    /// 校验错误保持原样，其余错误统一替换为 `message`。
    pub fn context(self, message: &'static str) -> Self {
        match self {
            AppError::ValidationError(_) | AppError::Operation { .. } => self,
            other => AppError::Operation {
                message,
                source: Box::new(other),
            },
        }
    }

    /// 返回给调用方的提示信息
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Operation { message, .. } => (*message).to_string(),
            // 内部错误：隐藏具体细节
            _ => "Internal server error".to_string(),
        }
    }
}

/// API 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_)
            | AppError::PushError(_)
            | AppError::InternalError(_)
            | AppError::ConfigError(_)
            | AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 详细错误只记录在服务端
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "请求处理错误");
        } else {
            tracing::debug!(error = %self, status = %status, "请求被拒绝");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::PushError(err.to_string())
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}
