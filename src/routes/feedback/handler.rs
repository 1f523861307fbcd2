use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use super::model::{FeedbackStore, ReplyRequest, SubmitFeedbackRequest};
use crate::{AppState, error::AppError, session, utils::SessionClaims, views};

#[axum::debug_handler]
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flashes) = session::take_flashes(jar, &state.config);
    (jar, views::index(&flashes))
}

#[axum::debug_handler]
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<SubmitFeedbackRequest>,
) -> Result<(CookieJar, Redirect), AppError> {
    let id = FeedbackStore::submit(&state.pool, req).await?;

    let jar = session::flash(
        jar,
        &state.config,
        format!("Feedback submitted! Your index number is: {}", id),
    )?;
    Ok((jar, Redirect::to("/")))
}

/// 公开的反馈列表，与员工面板数据相同
#[axum::debug_handler]
pub async fn view_feedback(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let feedbacks = FeedbackStore::list_all(&state.pool).await?;

    let (jar, flashes) = session::take_flashes(jar, &state.config);
    Ok((jar, views::view_feedback(&flashes, &feedbacks)))
}

#[axum::debug_handler]
pub async fn reply(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(feedback_id): Path<String>,
    jar: CookieJar,
    Form(req): Form<ReplyRequest>,
) -> Result<(CookieJar, Redirect), AppError> {
    // 非整数ID与不存在的ID一样按 404 处理
    let feedback_id: i64 = feedback_id.parse().map_err(|_| AppError::NotFound)?;

    let feedback = FeedbackStore::attach_reply(&state.pool, feedback_id, &req.reply).await?;
    tracing::info!("Staff {} replied to feedback {}", claims.staff_id, feedback.id);

    let jar = session::flash(jar, &state.config, "Reply sent.")?;
    Ok((jar, Redirect::to("/staff/dashboard")))
}
