//! 健康检查 API 处理器

use crate::db::PostgresPool;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 简单健康检查（用于负载均衡器）
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    }))
}

/// 就绪检查
pub async fn ready(pg_pool: web::Data<Arc<PostgresPool>>) -> HttpResponse {
    let db_ok = pg_pool.health_check().await.is_ok();

    if db_ok {
        HttpResponse::Ok().json(serde_json::json!({
            "ready": true
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "database": false
        }))
    }
}

/// 存活检查
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true
    }))
}
