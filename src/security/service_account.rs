//! Google 服务账号凭据
//!
//! 凭据优先从 `FIREBASE_SERVICE_ACCOUNT` 环境变量读取 JSON，
//! 否则读取配置中的文件路径。OAuth2 使用 JWT-bearer 授权，断言以 RS256 签名。

use crate::config::Settings;
use crate::errors::AppError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// FCM 发送所需的 OAuth2 scope
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// 断言有效期（秒），Google 上限为 1 小时
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// 服务账号密钥
#[derive(Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    private_key: SecretString,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// JWT 断言声明
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl ServiceAccountKey {
    /// 从 JSON 文本解析
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::ConfigError(format!("服务账号 JSON 无效: {}", e)))
    }

    /// 从文件读取
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("读取服务账号文件 {} 失败: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// 按 环境变量 → 配置文件路径 的顺序解析凭据
    pub fn resolve(settings: &Settings) -> Result<Self, AppError> {
        match Settings::service_account_json() {
            Some(json) => {
                tracing::debug!("使用 FIREBASE_SERVICE_ACCOUNT 环境变量中的服务账号");
                Self::from_json(json.expose_secret())
            }
            None => {
                tracing::debug!(
                    path = %settings.push.service_account_path,
                    "使用服务账号文件"
                );
                Self::from_file(&settings.push.service_account_path)
            }
        }
    }

    /// 构建断言声明
    pub fn claims(&self, scope: &str) -> AssertionClaims {
        let iat = Utc::now().timestamp();
        AssertionClaims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    /// 生成 RS256 签名的 JWT 断言
    pub fn sign_assertion(&self, scope: &str) -> Result<String, AppError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| AppError::ConfigError(format!("服务账号私钥无效: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &self.claims(scope), &key)
            .map_err(|e| AppError::InternalError(format!("签名 JWT 断言失败: {}", e)))
    }
}
