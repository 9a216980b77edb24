//! ELS Relay - 紧急封锁系统推送中继
//!
//! - 设备推送令牌注册与取消订阅
//! - 预警（封锁 / 可疑活动）持久化
//! - 通过 FCM 向全部设备多播推送，并清理失效令牌
//! - 历史预警查询与清空

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod security;
pub mod services;
pub mod utils;

pub use errors::AppError;
