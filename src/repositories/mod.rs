//! 数据访问层（Repository）
//!
//! 令牌库与预警日志以 trait 暴露，业务层只依赖抽象，便于替换存储实现。

mod alert_repo;
mod device_token_repo;

pub use alert_repo::AlertRepository;
pub use device_token_repo::DeviceTokenRepository;

use crate::errors::AppError;
use crate::models::{Alert, NewAlert};

/// 设备令牌存储
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// 写入令牌（已存在时仅刷新更新时间）
    async fn upsert(&self, token: &str) -> Result<(), AppError>;

    /// 删除令牌，不存在时不报错
    async fn delete(&self, token: &str) -> Result<(), AppError>;

    /// 当前全部令牌的快照
    async fn list_all(&self) -> Result<Vec<String>, AppError>;
}

/// 预警日志
#[async_trait::async_trait]
pub trait AlertLog: Send + Sync {
    /// 追加预警，由存储分配 ID 与时间戳
    async fn append(&self, alert: &NewAlert) -> Result<Alert, AppError>;

    /// 全部预警，按创建时间倒序
    async fn list_desc(&self) -> Result<Vec<Alert>, AppError>;

    /// 原子地清空全部预警，返回删除条数
    async fn clear(&self) -> Result<u64, AppError>;
}
