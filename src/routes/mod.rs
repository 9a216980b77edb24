//! 路由配置模块

use crate::errors::AppError;
use crate::handlers;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

pub const INVALID_BODY: &str = "Invalid request body";

/// 配置健康检查路由（依赖数据库连接池）
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(handlers::health))
            .route("/ready", web::get().to(handlers::ready))
            .route("/live", web::get().to(handlers::live)),
    );
}

/// 配置业务 API 路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/register-token", web::post().to(handlers::register_token))
            .route("/unsubscribe", web::post().to(handlers::unsubscribe))
            .route("/send-alert", web::post().to(handlers::send_alert))
            .route("/alerts", web::get().to(handlers::list_alerts))
            .route("/clear-alerts", web::post().to(handlers::clear_alerts)),
    );
}

/// 请求体解析失败统一返回 400 {error}
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            tracing::debug!(error = %err, "请求体解析失败");
            AppError::ValidationError(INVALID_BODY.to_string()).into()
        })
}
