use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;

use crate::common::ApiError;
use crate::services::Session;
use crate::types::SetupRequest;
use crate::web::forms::{AuthQuery, LoginForm, SetupForm};
use crate::web::helpers::{
    read_session, redirect, render, session_cookie, sign_out, DASHBOARD_PATH, LOGIN_PATH,
};
use crate::web::security::{generic_error_message, RateLimit};
use crate::web::state::AppState;
use crate::web::templates::{AdminLoginTemplate, AdminSetupTemplate};

fn login_error(code: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", format!("{}?error={}", LOGIN_PATH, code)))
        .finish()
}

#[get("/admin")]
pub async fn admin_root(req: HttpRequest) -> impl Responder {
    redirect(&req, DASHBOARD_PATH)
}

#[get("/admin/login")]
pub async fn login_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<AuthQuery>,
) -> HttpResponse {
    if read_session(&req, &state).is_ok() {
        return redirect(&req, DASHBOARD_PATH);
    }

    let error = query.error.as_deref().map(|code| match code {
        "missing" => "Email and password are required".to_string(),
        "invalid" => "Invalid email or password".to_string(),
        "expired" => "Your session has expired. Please sign in again.".to_string(),
        "rate_limit" => "Too many sign-in attempts. Please try again later.".to_string(),
        "unavailable" => "Could not reach the server. Please try again.".to_string(),
        _ => generic_error_message("sign-in"),
    });

    render(AdminLoginTemplate { error })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    if !state.rate_limiter.allow(&req, RateLimit::LOGIN) {
        return login_error("rate_limit");
    }

    if form.email.is_empty() || form.password.is_empty() {
        return login_error("missing");
    }

    let response = match state.api.login(&form.email, &form.password).await {
        Ok(response) => response,
        Err(ApiError::Rejected { status, .. }) if (400..500).contains(&status) => {
            return login_error("invalid");
        }
        Err(e) if e.is_transport() => {
            crate::log_err!("signing in", e);
            return login_error("unavailable");
        }
        Err(e) => {
            crate::log_err!("signing in", e);
            return login_error("internal");
        }
    };

    let session = Session::from_login(response, Utc::now(), state.settings.session_ttl);
    let cookie = match session_cookie(&state, &session) {
        Ok(cookie) => cookie,
        Err(e) => {
            crate::log_err!("storing session", e);
            return login_error("internal");
        }
    };

    log::info!("admin {} signed in", session.email());
    HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header(("Location", DASHBOARD_PATH))
        .finish()
}

#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Ok(session) = read_session(&req, &state) {
        // Best effort: the backend only records the event.
        if let Err(e) = state.api.logout(&session).await {
            log::warn!("backend logout failed: {}", e);
        }
        log::info!("admin {} signed out", session.email());
    }

    sign_out(&req, &state, None)
}

#[get("/admin/setup")]
pub async fn setup_form() -> impl Responder {
    render(AdminSetupTemplate {
        email: String::new(),
        error: None,
        success: None,
    })
}

#[post("/admin/setup")]
pub async fn setup_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SetupForm>,
) -> impl Responder {
    let form = form.into_inner();
    let page = |error: Option<String>, success: Option<String>| AdminSetupTemplate {
        email: form.email.clone(),
        error,
        success,
    };

    if !state.rate_limiter.allow(&req, RateLimit::SETUP) {
        return render(page(
            Some("Too many setup attempts. Please try again later.".into()),
            None,
        ));
    }

    if let Err(message) = form.validate() {
        return render(page(Some(message.to_string()), None));
    }

    let request = SetupRequest {
        email: form.email.clone(),
        password: form.password.clone(),
    };

    match state.api.setup_admin(&request).await {
        Ok(ack) => {
            log::info!("admin account created for {}", request.email);
            let message = ack
                .message
                .unwrap_or_else(|| "Admin account created. You can now sign in.".to_string());
            render(page(None, Some(message)))
        }
        Err(e) if e.is_transport() => {
            crate::log_err!("creating admin account", e);
            render(page(Some(generic_error_message("request")), None))
        }
        Err(e) => render(page(Some(e.to_string()), None)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_root)
        .service(login_form)
        .service(login_submit)
        .service(logout)
        .service(setup_form)
        .service(setup_submit);
}
