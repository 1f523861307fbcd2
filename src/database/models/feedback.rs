use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 反馈数据库实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeedbackEntity {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub level: String,
    pub content: String,
    /// Absent until a staff member replies.
    pub reply: Option<String>,
}
