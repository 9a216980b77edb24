//! HTTP 处理器模块

mod alert_handler;
mod device_token_handler;
mod health_handler;

pub use alert_handler::*;
pub use device_token_handler::*;
pub use health_handler::*;
