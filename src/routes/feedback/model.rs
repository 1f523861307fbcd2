use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    database::{FeedbackEntity, FeedbackRepository},
    error::AppError,
};

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub name: String,
    pub department: String,
    pub level: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
}

/// Feedback operations exposed to the handlers.
pub struct FeedbackStore;

impl FeedbackStore {
    /// Stores a new submission without a reply and returns its id.
    /// Empty fields are accepted as-is.
    pub async fn submit(pool: &SqlitePool, req: SubmitFeedbackRequest) -> Result<i64, AppError> {
        let feedback = FeedbackRepository::create(
            pool,
            &req.name,
            &req.department,
            &req.level,
            &req.content,
        )
        .await?;

        tracing::info!(
            "Feedback {} submitted for department {:?}",
            feedback.id,
            feedback.department
        );
        Ok(feedback.id)
    }

    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<FeedbackEntity>, AppError> {
        Ok(FeedbackRepository::list_all(pool).await?)
    }

    /// Overwrites the reply of feedback `id`. Concurrent replies race and the
    /// last write wins.
    pub async fn attach_reply(
        pool: &SqlitePool,
        id: i64,
        reply: &str,
    ) -> Result<FeedbackEntity, AppError> {
        FeedbackRepository::update_reply(pool, id, reply)
            .await?
            .ok_or(AppError::NotFound)
    }
}
