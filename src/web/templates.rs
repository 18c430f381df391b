use askama::Template;

use crate::models::{
    Alumnus, Event, FormField, GalleryImage, KcseResult, NewsItem, SchoolStat, Staff, Testimonial,
};
use crate::services::{CategoryFilter, Notice};
use crate::web::views::{PanelView, StatSection, TabView};

// PUBLIC

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub stats: Vec<SchoolStat>,
    pub news: Vec<NewsItem>,
    pub events: Vec<Event>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Template)]
#[template(path = "public/about.html")]
pub struct AboutTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub leadership: Vec<Staff>,
    pub staff: Vec<Staff>,
}

#[derive(Template)]
#[template(path = "public/academics.html")]
pub struct AcademicsTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub results: Vec<KcseResult>,
    pub sections: Vec<StatSection>,
}

#[derive(Template)]
#[template(path = "public/admissions.html")]
pub struct AdmissionsTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
}

#[derive(Template)]
#[template(path = "public/student_life.html")]
pub struct StudentLifeTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub events: Vec<Event>,
    pub photos: Vec<GalleryImage>,
}

#[derive(Template)]
#[template(path = "public/news.html")]
pub struct NewsTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub items: Vec<NewsItem>,
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
}

#[derive(Template)]
#[template(path = "public/gallery.html")]
pub struct GalleryTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub images: Vec<GalleryImage>,
    pub categories: Vec<String>,
    pub filter: CategoryFilter,
}

#[derive(Template)]
#[template(path = "public/alumni.html")]
pub struct AlumniTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub alumni: Vec<Alumnus>,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
pub struct ContactTemplate {
    pub active: &'static str,
    pub notices: Vec<Notice>,
    pub fields: Vec<FormField>,
    pub submitted: bool,
    pub confirmation: Option<String>,
}

// ADMIN

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/setup.html")]
pub struct AdminSetupTemplate {
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub email: String,
    pub tabs: Vec<TabView>,
    pub panel: PanelView,
}

/// The panel alone, for htmx swaps.
#[derive(Template)]
#[template(path = "admin/panel.html")]
pub struct AdminPanelTemplate {
    pub panel: PanelView,
}
