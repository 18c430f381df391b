use actix_web::{get, web, Responder};

use crate::api::ApiClient;
use crate::models::{
    Alumnus, Event, GalleryImage, KcseResult, NewsItem, Resource, SchoolStat, Staff, Testimonial,
};
use crate::services::{
    categories, filter_by_category, latest, leadership, CategoryFilter, Notice, ResourceController,
};
use crate::web::forms::CategoryQuery;
use crate::web::helpers::render;
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, AcademicsTemplate, AdmissionsTemplate, AlumniTemplate, GalleryTemplate,
    HomeTemplate, NewsTemplate, StudentLifeTemplate,
};
use crate::web::views::StatSection;

const HOME_NEWS: usize = 3;
const HOME_EVENTS: usize = 4;
const STUDENT_LIFE_PHOTOS: usize = 6;

/// Loads one collection for a read-only page. A failure yields an empty list and a notice
/// so the rest of the page still renders.
async fn fetch<R: Resource>(api: &ApiClient) -> (Vec<R>, Vec<Notice>) {
    let mut controller = ResourceController::<R>::public(api.clone());
    if let Err(e) = controller.load().await {
        log::warn!("public page could not load {}: {}", R::KIND, e);
    }
    let notices = controller.take_notices();
    (controller.into_items(), notices)
}

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let api = &state.api;
    let ((stats, n1), (news_items, n2), (events, n3), (testimonials, n4)) = tokio::join!(
        fetch::<SchoolStat>(api),
        fetch::<NewsItem>(api),
        fetch::<Event>(api),
        fetch::<Testimonial>(api),
    );

    render(HomeTemplate {
        active: "home",
        notices: [n1, n2, n3, n4].concat(),
        stats,
        news: latest(&news_items, HOME_NEWS).to_vec(),
        events: latest(&events, HOME_EVENTS).to_vec(),
        testimonials,
    })
}

#[get("/about")]
pub async fn about(state: web::Data<AppState>) -> impl Responder {
    let (staff, notices) = fetch::<Staff>(&state.api).await;
    let leaders = leadership(&staff).into_iter().cloned().collect();

    render(AboutTemplate {
        active: "about",
        notices,
        leadership: leaders,
        staff,
    })
}

#[get("/academics")]
pub async fn academics(state: web::Data<AppState>) -> impl Responder {
    let ((results, n1), (stats, n2)) = tokio::join!(
        fetch::<KcseResult>(&state.api),
        fetch::<SchoolStat>(&state.api),
    );

    render(AcademicsTemplate {
        active: "academics",
        notices: [n1, n2].concat(),
        results,
        sections: StatSection::from_stats(&stats),
    })
}

#[get("/admissions")]
pub async fn admissions() -> impl Responder {
    render(AdmissionsTemplate {
        active: "admissions",
        notices: Vec::new(),
    })
}

#[get("/student-life")]
pub async fn student_life(state: web::Data<AppState>) -> impl Responder {
    let ((events, n1), (photos, n2)) = tokio::join!(
        fetch::<Event>(&state.api),
        fetch::<GalleryImage>(&state.api),
    );

    render(StudentLifeTemplate {
        active: "student-life",
        notices: [n1, n2].concat(),
        events,
        photos: latest(&photos, STUDENT_LIFE_PHOTOS).to_vec(),
    })
}

#[get("/news")]
pub async fn news(state: web::Data<AppState>, query: web::Query<CategoryQuery>) -> impl Responder {
    let (items, notices) = fetch::<NewsItem>(&state.api).await;
    let filter = CategoryFilter::parse(query.category.as_deref());

    render(NewsTemplate {
        active: "news",
        notices,
        categories: categories(&items),
        items: filter_by_category(&items, &filter).into_iter().cloned().collect(),
        filter,
    })
}

#[get("/gallery")]
pub async fn gallery(state: web::Data<AppState>, query: web::Query<CategoryQuery>) -> impl Responder {
    let (images, notices) = fetch::<GalleryImage>(&state.api).await;
    let filter = CategoryFilter::parse(query.category.as_deref());

    render(GalleryTemplate {
        active: "gallery",
        notices,
        categories: categories(&images),
        images: filter_by_category(&images, &filter).into_iter().cloned().collect(),
        filter,
    })
}

#[get("/alumni")]
pub async fn alumni(state: web::Data<AppState>) -> impl Responder {
    let (members, notices) = fetch::<Alumnus>(&state.api).await;

    render(AlumniTemplate {
        active: "alumni",
        notices,
        alumni: members,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(about)
        .service(academics)
        .service(admissions)
        .service(student_life)
        .service(news)
        .service(gallery)
        .service(alumni);
}
