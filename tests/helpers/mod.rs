//! 测试辅助工具

use crate::mocks::{InMemoryAlertLog, InMemoryTokenStore, ScriptedPushGateway};
use els_relay::services::{AlertService, DeviceTokenService};
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Arc;

/// 测试上下文：共享的内存存储与推送网关
pub struct TestContext {
    pub tokens: Arc<InMemoryTokenStore>,
    pub alerts: Arc<InMemoryAlertLog>,
    pub push: Arc<ScriptedPushGateway>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(InMemoryTokenStore::new()),
            alerts: Arc::new(InMemoryAlertLog::new()),
            push: Arc::new(ScriptedPushGateway::new()),
        }
    }

    pub fn token_service(&self) -> Arc<DeviceTokenService> {
        Arc::new(DeviceTokenService::new(self.tokens.clone()))
    }

    pub fn alert_service(&self) -> Arc<AlertService> {
        Arc::new(AlertService::new(
            self.alerts.clone(),
            self.tokens.clone(),
            self.push.clone(),
        ))
    }
}

/// 生成上报人姓名
pub fn reporter_name() -> String {
    Name().fake()
}

/// 使用测试上下文初始化应用
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(els_relay::middleware::RequestLogger::new())
                .app_data(actix_web::web::Data::new($ctx.token_service()))
                .app_data(actix_web::web::Data::new($ctx.alert_service()))
                .configure(els_relay::routes::configure),
        )
        .await
    };
}
