//! 设备令牌处理器

use crate::errors::AppError;
use crate::models::{SuccessResponse, TokenRequest};
use crate::services::DeviceTokenService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// 注册推送令牌
/// POST /api/register-token
pub async fn register_token(
    token_service: web::Data<Arc<DeviceTokenService>>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let token = body.into_inner().into_token()?;

    token_service
        .register(&token)
        .await
        .map_err(|e| e.context("Failed to save token"))?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

/// 取消订阅
/// POST /api/unsubscribe
pub async fn unsubscribe(
    token_service: web::Data<Arc<DeviceTokenService>>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let token = body.into_inner().into_token()?;

    token_service
        .unsubscribe(&token)
        .await
        .map_err(|e| e.context("Failed to unsubscribe"))?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}
