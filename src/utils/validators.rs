//! 数据验证工具

use serde::{Deserialize, Deserializer};

/// 将 JSON `null` 视为空字符串，交由后续非空校验统一处理
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
