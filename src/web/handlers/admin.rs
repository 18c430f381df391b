use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use crate::common::{ApiError, MutationError};
use crate::models::{
    ContactMessage, Resource, ResourceId, ResourceKind, SchoolStat, StatPatch, Updatable,
};
use crate::services::{Notice, ResourceController, Session};
use crate::web::forms::{DashboardQuery, DeleteForm, DraftForm, StatValueForm};
use crate::web::helpers::{is_htmx, render, require_session, sign_out};
use crate::web::state::AppState;
use crate::web::templates::{AdminDashboardTemplate, AdminPanelTemplate};
use crate::web::views::{PanelView, TabView};

/// `Err` only when the backend no longer accepts the session; every other failure is
/// already a notice on the panel.
type PanelResult = Result<PanelView, ApiError>;

fn signed_out(err: &MutationError) -> Option<ApiError> {
    match err {
        MutationError::Api(e) if e.is_unauthorized() => Some(e.clone()),
        _ => None,
    }
}

async fn loaded<R: Resource>(
    state: &AppState,
    session: Session,
) -> Result<ResourceController<R>, ApiError> {
    let mut controller = ResourceController::<R>::new(state.api.clone(), Some(session));
    match controller.load().await {
        Err(e) if e.is_unauthorized() => Err(e),
        _ => Ok(controller),
    }
}

async fn show_panel<R: Resource>(state: &AppState, session: Session, open_modal: bool) -> PanelResult {
    let mut controller = loaded::<R>(state, session).await?;
    if open_modal && R::KIND.admin_can_create() {
        controller.open_modal();
    }
    Ok(PanelView::build(&mut controller, None))
}

async fn create_in_panel<R: Resource>(state: &AppState, session: Session, form: DraftForm) -> PanelResult {
    let mut controller = loaded::<R>(state, session).await?;

    match form.into_draft::<R::Draft>() {
        Ok(draft) => {
            if let Err(e) = controller.create(draft).await {
                if let Some(err) = signed_out(&e) {
                    return Err(err);
                }
            }
        }
        Err(e) => {
            crate::log_err!("reading admin form", e);
            controller.open_modal();
            controller.push_notice(Notice::error("The form could not be read. Please try again."));
        }
    }

    Ok(PanelView::build(&mut controller, None))
}

async fn delete_in_panel<R: Resource>(
    state: &AppState,
    session: Session,
    id: ResourceId,
    confirmed: bool,
) -> PanelResult {
    let mut controller = loaded::<R>(state, session).await?;

    let pending = match controller.delete(id, |_| confirmed).await {
        Err(MutationError::Declined) => Some(id),
        Err(MutationError::NotFound(_)) => {
            controller.push_notice(Notice::error("That item no longer exists."));
            None
        }
        Err(e) => match signed_out(&e) {
            Some(err) => return Err(err),
            None => None,
        },
        Ok(()) => None,
    };

    Ok(PanelView::build(&mut controller, pending))
}

async fn update_in_panel<R: Updatable>(
    state: &AppState,
    session: Session,
    id: ResourceId,
    patch: R::Patch,
) -> PanelResult {
    let mut controller = loaded::<R>(state, session).await?;

    match controller.update(id, patch).await {
        Err(MutationError::NotFound(_)) => {
            controller.push_notice(Notice::error("That item no longer exists."));
        }
        Err(e) => {
            if let Some(err) = signed_out(&e) {
                return Err(err);
            }
        }
        Ok(()) => {}
    }

    Ok(PanelView::build(&mut controller, None))
}

async fn mark_read_in_panel(state: &AppState, session: Session, id: ResourceId) -> PanelResult {
    let mut controller = loaded::<ContactMessage>(state, session).await?;

    if let Err(e) = controller.mark_read(id).await {
        if let Some(err) = signed_out(&e) {
            return Err(err);
        }
    }

    Ok(PanelView::build(&mut controller, None))
}

/// Panel fragment for htmx, full dashboard otherwise. A rejected session signs the admin out.
fn respond(
    req: &HttpRequest,
    state: &AppState,
    session: &Session,
    kind: ResourceKind,
    result: PanelResult,
) -> HttpResponse {
    match result {
        Ok(panel) if is_htmx(req) => render(AdminPanelTemplate { panel }),
        Ok(panel) => render(AdminDashboardTemplate {
            email: session.email().to_string(),
            tabs: TabView::all(kind),
            panel,
        }),
        Err(e) => {
            log::info!("backend rejected the admin session: {}", e);
            sign_out(req, state, Some("expired"))
        }
    }
}

fn parse_kind(raw: &str) -> Option<ResourceKind> {
    raw.parse().ok()
}

#[get("/admin/dashboard")]
pub async fn dashboard(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    let session = match require_session(&req, &state) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let kind = query
        .tab
        .as_deref()
        .and_then(parse_kind)
        .unwrap_or(ResourceKind::ALL[0]);
    let open_modal = query.wants_modal();

    let result = crate::with_resource!(kind, R => show_panel::<R>(&state, session.clone(), open_modal).await);
    respond(&req, &state, &session, kind, result)
}

#[post("/admin/{resource:staff|news|events|gallery|testimonials|stats|alumni|kcse}")]
pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<DraftForm>,
) -> impl Responder {
    let session = match require_session(&req, &state) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let Some(kind) = parse_kind(&path.into_inner()) else {
        return HttpResponse::NotFound().body("Unknown resource");
    };

    let form = form.into_inner();
    let result = crate::with_resource!(kind, R => create_in_panel::<R>(&state, session.clone(), form).await);
    respond(&req, &state, &session, kind, result)
}

#[post("/admin/{resource}/{id}/delete")]
pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, i64)>,
    form: web::Form<DeleteForm>,
) -> impl Responder {
    let session = match require_session(&req, &state) {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let (resource, id) = path.into_inner();
    let Some(kind) = parse_kind(&resource) else {
        return HttpResponse::NotFound().body("Unknown resource");
    };

    let id = ResourceId(id);
    let confirmed = form.confirmed;
    let result =
        crate::with_resource!(kind, R => delete_in_panel::<R>(&state, session.clone(), id, confirmed).await);
    respond(&req, &state, &session, kind, result)
}

#[post("/admin/stats/{id}")]
pub async fn update_stat(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Form<StatValueForm>,
) -> impl Responder {
    let session = match require_session(&req, &state) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let form = form.into_inner();
    let result = if form.stat_value.is_empty() {
        loaded::<SchoolStat>(&state, session.clone())
            .await
            .map(|mut controller| {
                controller.push_notice(Notice::error("Value is required"));
                PanelView::build(&mut controller, None)
            })
    } else {
        let patch = StatPatch {
            stat_value: form.stat_value,
        };
        update_in_panel::<SchoolStat>(&state, session.clone(), ResourceId(path.into_inner()), patch).await
    };

    respond(&req, &state, &session, ResourceKind::Stats, result)
}

#[post("/admin/contact/{id}/read")]
pub async fn mark_read(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> impl Responder {
    let session = match require_session(&req, &state) {
        Ok(session) => session,
        Err(resp) => return resp,
    };

    let result = mark_read_in_panel(&state, session.clone(), ResourceId(path.into_inner())).await;
    respond(&req, &state, &session, ResourceKind::Contact, result)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(update_stat)
        .service(mark_read)
        .service(delete)
        .service(create);
}
