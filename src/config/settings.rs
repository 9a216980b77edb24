//! 应用配置加载和管理

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;

/// 应用配置结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub push: PushSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 表示按 CPU 核数
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 10000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    #[serde(default)]
    pub require_ssl: bool,
    /// 启动时执行内嵌迁移
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            require_ssl: false,
            run_migrations: true,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 5 }
fn default_idle_timeout() -> u64 { 300 }
fn default_true() -> bool { true }

/// 推送网关（FCM HTTP v1）配置
#[derive(Debug, Clone, Deserialize)]
pub struct PushSettings {
    /// 关闭后使用空推送网关，便于无凭据的本地开发
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// FCM API 根地址
    #[serde(default = "default_push_endpoint")]
    pub endpoint: String,
    /// 服务账号 JSON 文件路径（FIREBASE_SERVICE_ACCOUNT 未设置时使用）
    #[serde(default = "default_service_account_path")]
    pub service_account_path: String,
    /// 单次推送请求超时（秒）
    #[serde(default = "default_push_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PushSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_push_endpoint(),
            service_account_path: default_service_account_path(),
            request_timeout_seconds: default_push_timeout(),
        }
    }
}

fn default_push_endpoint() -> String { "https://fcm.googleapis.com".to_string() }
fn default_service_account_path() -> String { "serviceAccountKey.json".to_string() }
fn default_push_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// pretty 或 json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// 从配置文件和环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let settings = Config::builder()
            // 默认配置（可选）
            .add_source(File::with_name("config/default").required(false))
            // 根据环境加载对应配置
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // 环境变量覆盖，前缀 ELS，分隔符 __
            .add_source(
                Environment::with_prefix("ELS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            // 托管平台约定的 PORT 优先级最高
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// 获取数据库连接 URL（从环境变量）
    pub fn database_url() -> Option<SecretString> {
        env::var("DATABASE_URL").ok().map(SecretString::new)
    }

    /// 获取内联的服务账号 JSON（从环境变量）
    pub fn service_account_json() -> Option<SecretString> {
        env::var("FIREBASE_SERVICE_ACCOUNT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(SecretString::new)
    }

    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 实际工作线程数
    pub fn worker_count(&self) -> usize {
        if self.server.workers == 0 {
            num_cpus::get()
        } else {
            self.server.workers
        }
    }
}
