use actix_web::{get, post, web, HttpRequest, Responder};

use crate::models::ContactForm;
use crate::services::{ContactFormController, Notice};
use crate::web::helpers::render;
use crate::web::security::RateLimit;
use crate::web::state::AppState;
use crate::web::templates::ContactTemplate;

fn page(controller: &ContactFormController, extra: Option<Notice>) -> ContactTemplate {
    ContactTemplate {
        active: "contact",
        notices: controller.notice().cloned().into_iter().chain(extra).collect(),
        fields: controller.fields(),
        submitted: controller.is_submitted(),
        confirmation: controller.confirmation().map(str::to_string),
    }
}

#[get("/contact")]
pub async fn contact_form(state: web::Data<AppState>) -> impl Responder {
    let controller = ContactFormController::new(state.api.clone());
    render(page(&controller, None))
}

#[post("/contact")]
pub async fn contact_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> impl Responder {
    let mut controller = ContactFormController::with_values(state.api.clone(), form.into_inner());

    if !state.rate_limiter.allow(&req, RateLimit::CONTACT) {
        let notice = Notice::error("Too many messages sent. Please try again later.");
        return render(page(&controller, Some(notice)));
    }

    if let Err(e) = controller.submit().await {
        log::info!("contact form not sent: {}", e);
    }

    render(page(&controller, None))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(contact_form).service(contact_submit);
}
