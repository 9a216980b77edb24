//! 业务逻辑层（Service）

mod alert_service;
mod device_token_service;
mod fcm_service;
mod push_gateway;

pub use alert_service::AlertService;
pub use device_token_service::DeviceTokenService;
pub use fcm_service::{FcmPushGateway, MULTICAST_BATCH_SIZE};
pub use push_gateway::{build_push_gateway, NoopPushGateway, PushGateway};
