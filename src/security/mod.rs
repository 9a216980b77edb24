//! 安全模块：推送服务账号凭据

mod service_account;

pub use service_account::{AssertionClaims, ServiceAccountKey, FCM_SCOPE};
