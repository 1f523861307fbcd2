use axum::{
    extract::{Extension, Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::model::{LoginRequest, RegisterRequest, StaffAccounts};
use crate::{
    AppState, error::AppError, routes::feedback::FeedbackStore, session, utils::SessionClaims,
    views,
};

#[axum::debug_handler]
pub async fn register_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, flashes) = session::take_flashes(jar, &state.config);
    (jar, views::staff_register(&flashes))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<RegisterRequest>,
) -> Result<(CookieJar, Redirect), AppError> {
    match StaffAccounts::register(&state.pool, state.config.password_hash_cost, req).await? {
        Ok(_) => {
            // 注册不会自动登录
            let jar = session::flash(jar, &state.config, "Registration successful. Please log in.")?;
            Ok((jar, Redirect::to("/staff/login")))
        }
        Err(rejection) => {
            let jar = session::flash(jar, &state.config, rejection.to_string())?;
            Ok((jar, Redirect::to("/staff/register")))
        }
    }
}

#[axum::debug_handler]
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flashes) = session::take_flashes(jar, &state.config);
    (jar, views::staff_login(&flashes))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Result<Response, AppError> {
    match StaffAccounts::login(&state.pool, &req.username, &req.password).await? {
        Ok(staff) => {
            let jar = session::start(jar, staff.id, &state.config)?;
            tracing::info!("Staff {} logged in", staff.id);
            Ok((jar, Redirect::to("/staff/dashboard")).into_response())
        }
        // 登录失败直接重新渲染登录页
        Err(rejection) => {
            let (jar, mut flashes) = session::take_flashes(jar, &state.config);
            flashes.push(rejection.to_string());
            Ok((jar, views::staff_login(&flashes)).into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let feedbacks = FeedbackStore::list_all(&state.pool).await?;
    tracing::debug!("Staff {} opened the dashboard", claims.staff_id);

    let (jar, flashes) = session::take_flashes(jar, &state.config);
    Ok((jar, views::staff_dashboard(&flashes, &feedbacks)))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(claims) = session::current(&jar, &state.config) {
        tracing::info!("Staff {} logged out", claims.staff_id);
    }

    let jar = session::flash(session::end(jar), &state.config, "Logged out successfully")?;
    Ok((jar, Redirect::to("/staff/login")))
}
