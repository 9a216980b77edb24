//! 预警数据仓库

use super::AlertLog;
use crate::db::PostgresPool;
use crate::errors::AppError;
use crate::models::{Alert, NewAlert};
use chrono::Utc;
use uuid::Uuid;

/// 预警数据仓库
#[derive(Clone)]
pub struct AlertRepository {
    pool: PostgresPool,
}

impl AlertRepository {
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AlertLog for AlertRepository {
    async fn append(&self, alert: &NewAlert) -> Result<Alert, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let alert = sqlx::query_as::<_, Alert>(
            r#"
            INSERT INTO alerts (id, name, type, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, type, message, created_at
            "#,
        )
        .bind(id)
        .bind(&alert.name)
        .bind(alert.alert_type)
        .bind(&alert.message)
        .bind(now)
        .fetch_one(self.pool.pool())
        .await?;

        Ok(alert)
    }

    async fn list_desc(&self) -> Result<Vec<Alert>, AppError> {
        let alerts = sqlx::query_as::<_, Alert>(
            "SELECT id, name, type, message, created_at FROM alerts ORDER BY created_at DESC",
        )
        .fetch_all(self.pool.pool())
        .await?;

        Ok(alerts)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        // 单事务删除，要么全部提交要么全部回滚
        let mut tx = self.pool.pool().begin().await?;

        let result = sqlx::query("DELETE FROM alerts")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }
}
