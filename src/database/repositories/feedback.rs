use sqlx::SqlitePool;

use crate::database::models::feedback::FeedbackEntity;

/// 反馈存储库实现
pub struct FeedbackRepository;

impl FeedbackRepository {
    /// 创建反馈，回复为空
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        department: &str,
        level: &str,
        content: &str,
    ) -> Result<FeedbackEntity, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO feedback (name, department, level, content, reply)
            VALUES (?, ?, ?, ?, NULL)
            RETURNING id, name, department, level, content, reply
            "#,
        )
        .bind(name)
        .bind(department)
        .bind(level)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// 按存储顺序列出全部反馈
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<FeedbackEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            SELECT id, name, department, level, content, reply
            FROM feedback
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// 覆盖回复；记录不存在时返回 None
    pub async fn update_reply(
        pool: &SqlitePool,
        id: i64,
        reply: &str,
    ) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            UPDATE feedback
            SET reply = ?
            WHERE id = ?
            RETURNING id, name, department, level, content, reply
            "#,
        )
        .bind(reply)
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
