use sqlx::SqlitePool;

use crate::database::models::staff::StaffEntity;

/// 员工账号存储库实现
pub struct StaffRepository;

impl StaffRepository {
    /// 创建员工账号，密码必须已经哈希
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<StaffEntity, sqlx::Error> {
        sqlx::query_as::<_, StaffEntity>(
            r#"
            INSERT INTO staff (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
    }

    /// 根据用户名查找账号
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<StaffEntity>, sqlx::Error> {
        sqlx::query_as::<_, StaffEntity>(
            r#"
            SELECT id, username, password_hash
            FROM staff
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}
