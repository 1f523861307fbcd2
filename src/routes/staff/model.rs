use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    database::{StaffEntity, StaffRepository},
    error::{AppError, Rejection},
    utils::{hash_password, verify_password},
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Staff registration and credential checks.
///
/// The outer `Result` carries infrastructure failures; the inner one says
/// whether the account action was accepted.
pub struct StaffAccounts;

impl StaffAccounts {
    /// Creates an account. Mismatched confirmation is reported before the
    /// username is looked up.
    pub async fn register(
        pool: &SqlitePool,
        password_hash_cost: u32,
        req: RegisterRequest,
    ) -> Result<Result<StaffEntity, Rejection>, AppError> {
        if req.password != req.confirm {
            return Ok(Err(Rejection::PasswordMismatch));
        }
        if req.username.is_empty() {
            return Ok(Err(Rejection::UsernameRequired));
        }
        if StaffRepository::find_by_username(pool, &req.username)
            .await?
            .is_some()
        {
            return Ok(Err(Rejection::UsernameTaken));
        }

        let password_hash = hash_password(&req.password, password_hash_cost)?;

        // UNIQUE 约束兜底并发注册
        match StaffRepository::create(pool, &req.username, &password_hash).await {
            Ok(staff) => {
                tracing::info!("Registered staff account {} ({})", staff.username, staff.id);
                Ok(Ok(staff))
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(Err(Rejection::UsernameTaken))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks credentials. Unknown usernames and wrong passwords produce the
    /// same rejection.
    pub async fn login(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Result<StaffEntity, Rejection>, AppError> {
        let Some(staff) = StaffRepository::find_by_username(pool, username).await? else {
            tracing::warn!("Login failed for {:?}", username);
            return Ok(Err(Rejection::InvalidCredentials));
        };

        if !verify_password(password, &staff.password_hash)? {
            tracing::warn!("Login failed for {:?}", username);
            return Ok(Err(Rejection::InvalidCredentials));
        }

        Ok(Ok(staff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    const COST: u32 = 4;

    fn register_request(username: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let pool = memory_pool().await;

        let staff = StaffAccounts::register(&pool, COST, register_request("amy", "s3cret", "s3cret"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(staff.username, "amy");
        assert_ne!(staff.password_hash, "s3cret");
        assert!(verify_password("s3cret", &staff.password_hash).unwrap());
    }

    #[tokio::test]
    async fn register_rejects_mismatched_confirmation() {
        let pool = memory_pool().await;

        let err = StaffAccounts::register(&pool, COST, register_request("amy", "a", "b"))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, Rejection::PasswordMismatch));
        assert!(StaffRepository::find_by_username(&pool, "amy").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_empty_username() {
        let pool = memory_pool().await;

        let err = StaffAccounts::register(&pool, COST, register_request("", "pw", "pw"))
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Rejection::UsernameRequired));
    }

    #[tokio::test]
    async fn duplicate_username_keeps_first_account() {
        let pool = memory_pool().await;
        let first = StaffAccounts::register(&pool, COST, register_request("amy", "one", "one"))
            .await
            .unwrap()
            .unwrap();

        let err = StaffAccounts::register(&pool, COST, register_request("amy", "two", "two"))
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Rejection::UsernameTaken));

        let stored = StaffRepository::find_by_username(&pool, "amy").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert!(verify_password("one", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn unique_constraint_maps_to_username_taken() {
        let pool = memory_pool().await;
        StaffRepository::create(&pool, "amy", "hash").await.unwrap();

        let err = StaffRepository::create(&pool, "amy", "other").await.unwrap_err();
        match err {
            sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_succeeds_only_with_matching_password() {
        let pool = memory_pool().await;
        let staff = StaffAccounts::register(&pool, COST, register_request("amy", "right", "right"))
            .await
            .unwrap()
            .unwrap();

        let ok = StaffAccounts::login(&pool, "amy", "right").await.unwrap().unwrap();
        assert_eq!(ok.id, staff.id);

        let wrong = StaffAccounts::login(&pool, "amy", "wrong").await.unwrap().unwrap_err();
        let unknown = StaffAccounts::login(&pool, "bob", "right").await.unwrap().unwrap_err();
        assert_eq!(wrong, Rejection::InvalidCredentials);
        assert_eq!(unknown, wrong);
    }
}
