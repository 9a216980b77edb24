//! 预警 API 处理器

use crate::errors::AppError;
use crate::models::{SendAlertRequest, SuccessResponse};
use crate::services::AlertService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 发送预警（管理员）
/// POST /api/send-alert
pub async fn send_alert(
    alert_service: web::Data<Arc<AlertService>>,
    body: web::Json<SendAlertRequest>,
) -> Result<HttpResponse, AppError> {
    // 校验失败时不产生任何副作用
    let new_alert = body.into_inner().into_new_alert()?;

    let outcome = alert_service
        .send_alert(new_alert)
        .await
        .map_err(|e| e.context("Failed to send alert"))?;

    Ok(HttpResponse::Ok().json(SuccessResponse::with_id(outcome.alert.id)))
}

/// 查询全部预警，最新的在前
/// GET /api/alerts
pub async fn list_alerts(
    alert_service: web::Data<Arc<AlertService>>,
) -> Result<HttpResponse, AppError> {
    let alerts = alert_service
        .list()
        .await
        .map_err(|e| e.context("Failed to fetch alerts"))?;

    Ok(HttpResponse::Ok().json(alerts))
}

/// 清空预警
/// POST /api/clear-alerts
pub async fn clear_alerts(
    alert_service: web::Data<Arc<AlertService>>,
) -> Result<HttpResponse, AppError> {
    alert_service
        .clear()
        .await
        .map_err(|e| e.context("Failed to clear alerts"))?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
