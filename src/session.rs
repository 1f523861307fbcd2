//! Cookie plumbing for the staff session and one-shot flash messages.
//!
//! Both cookies hold tokens signed with the process secret, so a client can
//! read them but not forge or alter them. The session cookie carries
//! [`SessionClaims`]; the flash cookie carries the messages queued for the
//! next rendered page.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    config::Config,
    error::AppError,
    utils::{
        SessionClaims, generate_flash_token, generate_session_token, verify_flash_token,
        verify_session_token,
    },
};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

// 只保留最近的几条，避免 cookie 超过浏览器 4KB 上限
pub const MAX_FLASH_MESSAGES: usize = 5;

fn app_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Issues a session for `staff_id` and stores it in the jar. The cookie
/// lives as long as the token it carries.
pub fn start(jar: CookieJar, staff_id: i64, config: &Config) -> Result<CookieJar, AppError> {
    let (token, expires_at) = generate_session_token(staff_id, config)?;
    let max_age = cookie::time::Duration::try_from(config.session_expiration())
        .map_err(|_| AppError::SessionLifetime(config.session_expiration_secs))?;

    let mut session = app_cookie(SESSION_COOKIE, token);
    session.set_max_age(max_age);
    tracing::debug!("Session for staff {} expires at {}", staff_id, expires_at);
    Ok(jar.add(session))
}

/// Drops the session cookie. A jar without one is returned unchanged in effect.
pub fn end(jar: CookieJar) -> CookieJar {
    jar.remove(removal(SESSION_COOKIE))
}

/// Returns the verified session payload, or `None` for anonymous clients.
/// Tampered and expired tokens count as anonymous.
pub fn current(jar: &CookieJar, config: &Config) -> Option<SessionClaims> {
    let token = jar.get(SESSION_COOKIE)?;
    match verify_session_token(token.value(), config) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!("Rejected session cookie: {}", e);
            None
        }
    }
}

fn pending(jar: &CookieJar, config: &Config) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| verify_flash_token(c.value(), config).ok())
        .unwrap_or_default()
}

/// Queues `message` behind any messages not yet shown. Only the newest
/// [`MAX_FLASH_MESSAGES`] are kept.
pub fn flash(
    jar: CookieJar,
    config: &Config,
    message: impl Into<String>,
) -> Result<CookieJar, AppError> {
    let mut messages = pending(&jar, config);
    messages.push(message.into());
    if messages.len() > MAX_FLASH_MESSAGES {
        messages.drain(..messages.len() - MAX_FLASH_MESSAGES);
    }
    let token = generate_flash_token(messages, config)?;
    Ok(jar.add(app_cookie(FLASH_COOKIE, token)))
}

/// Takes every queued message and clears the flash cookie.
pub fn take_flashes(jar: CookieJar, config: &Config) -> (CookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let messages = pending(&jar, config);
    (jar.remove(removal(FLASH_COOKIE)), messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::test_config;

    #[test]
    fn anonymous_without_cookie() {
        let config = test_config();
        assert!(current(&CookieJar::new(), &config).is_none());
    }

    #[test]
    fn started_session_is_current_until_ended() {
        let config = test_config();
        let jar = start(CookieJar::new(), 7, &config).unwrap();

        assert_eq!(current(&jar, &config).map(|c| c.staff_id), Some(7));

        let jar = end(jar);
        assert!(current(&jar, &config).is_none());
    }

    #[test]
    fn session_cookie_max_age_matches_configured_lifetime() {
        let mut config = test_config();
        config.session_expiration_secs = 7200;
        let jar = start(CookieJar::new(), 7, &config).unwrap();

        let session = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(session.max_age(), Some(cookie::time::Duration::seconds(7200)));
        assert_eq!(session.http_only(), Some(true));
    }

    #[test]
    fn oversized_session_lifetime_refuses_to_start() {
        let mut config = test_config();
        config.session_expiration_secs = u64::MAX;

        let err = start(CookieJar::new(), 7, &config).unwrap_err();
        assert!(matches!(err, AppError::SessionLifetime(_)));
    }

    #[test]
    fn forged_session_cookie_is_anonymous() {
        let config = test_config();
        let jar = CookieJar::new().add(app_cookie(SESSION_COOKIE, "not.a.token".to_string()));
        assert!(current(&jar, &config).is_none());
    }

    #[test]
    fn flashes_accumulate_and_are_taken_once() {
        let config = test_config();
        let jar = flash(CookieJar::new(), &config, "one").unwrap();
        let jar = flash(jar, &config, "two").unwrap();

        let (jar, messages) = take_flashes(jar, &config);
        assert_eq!(messages, vec!["one".to_string(), "two".to_string()]);

        let (_, messages) = take_flashes(jar, &config);
        assert!(messages.is_empty());
    }

    #[test]
    fn flash_queue_keeps_only_newest_messages() {
        let config = test_config();
        let mut jar = CookieJar::new();
        for i in 0..(MAX_FLASH_MESSAGES + 3) {
            jar = flash(jar, &config, format!("message {i}")).unwrap();
        }

        let (_, messages) = take_flashes(jar, &config);
        assert_eq!(messages.len(), MAX_FLASH_MESSAGES);
        assert_eq!(messages.first().map(String::as_str), Some("message 3"));
        assert_eq!(
            messages.last().cloned(),
            Some(format!("message {}", MAX_FLASH_MESSAGES + 2))
        );
    }
}
