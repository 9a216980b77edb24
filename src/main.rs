//! ELS Relay - 紧急封锁系统推送中继

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use els_relay::{
    config::{LoggingSettings, Settings},
    db::PostgresPool,
    middleware::RequestLogger,
    repositories::{AlertLog, AlertRepository, DeviceTokenRepository, TokenStore},
    routes,
    services::{build_push_gateway, AlertService, DeviceTokenService},
    AppError,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let settings = Settings::load().map_err(AppError::from)?;

    // 初始化日志
    init_tracing(&settings.logging);

    info!("🚨 ELS Relay 启动中...");

    // 连接数据库
    let pg_pool = Arc::new(PostgresPool::new(&settings).await?);
    info!("✅ 数据库连接成功");

    if settings.database.run_migrations {
        pg_pool.run_migrations().await?;
        info!("✅ 数据库迁移完成");
    }

    // 初始化仓库
    let token_store: Arc<dyn TokenStore> = Arc::new(DeviceTokenRepository::new((*pg_pool).clone()));
    let alert_log: Arc<dyn AlertLog> = Arc::new(AlertRepository::new((*pg_pool).clone()));

    // 初始化推送网关
    let push_gateway = build_push_gateway(&settings)?;
    info!("✅ 推送网关初始化完成");

    // 初始化服务
    let token_service = Arc::new(DeviceTokenService::new(token_store.clone()));
    let alert_service = Arc::new(AlertService::new(alert_log, token_store, push_gateway));

    let server_addr = settings.server_addr();
    let workers = settings.worker_count();

    info!("🚀 服务启动在 http://{}", server_addr);
    info!("📊 工作线程数: {}", workers);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(RequestLogger::new())
            .app_data(web::Data::new(pg_pool.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(alert_service.clone()))
            .configure(routes::configure_health)
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&server_addr)?
    .run()
    .await
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先，其次使用配置中的日志级别。
fn init_tracing(logging: &LoggingSettings) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},els_relay=debug", logging.level))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
