//! 通用数据结构

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 写操作成功响应
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true, id: None }
    }

    pub fn with_id(id: Uuid) -> Self {
        Self { success: true, id: Some(id) }
    }
}
