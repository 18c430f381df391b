use actix_web::cookie::{time, Cookie, CookieJar, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use chrono::Utc;

use crate::common::SessionError;
use crate::services::Session;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "sp_session";
pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

/// 303 for plain browser requests, `HX-Redirect` for htmx ones.
pub fn redirect(req: &HttpRequest, location: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", location.to_string()))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", location.to_string()))
            .finish()
    }
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            crate::log_err!("rendering template", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

/// Encrypts `session` into the session cookie. The cookie lives exactly as long as the session.
pub fn session_cookie(state: &AppState, session: &Session) -> Result<Cookie<'static>, SessionError> {
    let value = serde_json::to_string(session).map_err(|e| SessionError::Malformed(e.to_string()))?;
    let remaining = (session.expires_at - Utc::now()).num_seconds().max(0);

    let cookie = Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(state.settings.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(remaining))
        .finish();

    let mut jar = CookieJar::new();
    jar.private_mut(&state.cookie_key).add(cookie);
    jar.get(SESSION_COOKIE)
        .cloned()
        .ok_or_else(|| SessionError::Malformed("session cookie was not stored".into()))
}

pub fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(state.settings.cookie_secure)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// Decrypts and checks the session carried by `req`.
pub fn read_session(req: &HttpRequest, state: &AppState) -> Result<Session, SessionError> {
    let cookie = req.cookie(SESSION_COOKIE).ok_or(SessionError::Missing)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    let decrypted = jar
        .private(&state.cookie_key)
        .get(SESSION_COOKIE)
        .ok_or_else(|| SessionError::Malformed("cookie failed to decrypt".into()))?;

    let session: Session =
        serde_json::from_str(decrypted.value()).map_err(|e| SessionError::Malformed(e.to_string()))?;

    if session.is_expired() {
        return Err(SessionError::Expired);
    }
    Ok(session)
}

/// Gate for admin routes: a live session, or a redirect to the login page.
pub fn require_session(req: &HttpRequest, state: &AppState) -> Result<Session, HttpResponse> {
    match read_session(req, state) {
        Ok(session) => Ok(session),
        Err(SessionError::Missing) => Err(login_redirect(req, None)),
        Err(e) => {
            log::info!("dropping admin session: {}", e);
            Err(sign_out(req, state, Some("expired")))
        }
    }
}

fn login_redirect(req: &HttpRequest, error: Option<&str>) -> HttpResponse {
    let location = match error {
        Some(code) => format!("{}?error={}", LOGIN_PATH, code),
        None => LOGIN_PATH.to_string(),
    };

    if is_htmx(req) {
        HttpResponse::Unauthorized()
            .insert_header(("HX-Redirect", location))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", location))
            .finish()
    }
}

/// Clears the session cookie and sends the admin back to the login page.
pub fn sign_out(req: &HttpRequest, state: &AppState, error: Option<&str>) -> HttpResponse {
    let mut response = login_redirect(req, error);
    if let Err(e) = response.add_cookie(&removal_cookie(state)) {
        crate::log_err!("clearing session cookie", e);
    }
    response
}
