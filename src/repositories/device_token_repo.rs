//! 设备令牌数据仓库

use super::TokenStore;
use crate::db::PostgresPool;
use crate::errors::AppError;
use crate::models::DeviceToken;

/// 设备令牌仓库
#[derive(Clone)]
pub struct DeviceTokenRepository {
    pool: PostgresPool,
}

impl DeviceTokenRepository {
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// 根据令牌值查找
    pub async fn find(&self, token: &str) -> Result<Option<DeviceToken>, AppError> {
        let row = sqlx::query_as::<_, DeviceToken>(
            "SELECT token, created_at, updated_at FROM device_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(row)
    }
}

#[async_trait::async_trait]
impl TokenStore for DeviceTokenRepository {
    async fn upsert(&self, token: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO device_tokens (token, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            ON CONFLICT (token) DO UPDATE SET updated_at = NOW()
            "#,
        )
        .bind(token)
        .execute(self.pool.pool())
        .await?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM device_tokens WHERE token = $1")
            .bind(token)
            .execute(self.pool.pool())
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<String>, AppError> {
        let tokens: Vec<(String,)> = sqlx::query_as("SELECT token FROM device_tokens")
            .fetch_all(self.pool.pool())
            .await?;

        Ok(tokens.into_iter().map(|(token,)| token).collect())
    }
}
