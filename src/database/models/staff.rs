use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 员工账号数据库实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffEntity {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
