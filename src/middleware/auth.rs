use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{AppState, session};

/// Lets the request through only with a valid staff session, exposing the
/// claims as an `Extension<SessionClaims>`. Anonymous clients are sent to the
/// login page.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match session::current(&jar, &state.config) {
        Some(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        None => {
            tracing::debug!("Unauthenticated request to {}", request.uri().path());
            // 清掉无效或过期的会话 cookie
            let jar = if jar.get(session::SESSION_COOKIE).is_some() {
                session::end(jar)
            } else {
                jar
            };
            (jar, Redirect::to("/staff/login")).into_response()
        }
    }
}
