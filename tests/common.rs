#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use schoolpress::api::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
use schoolpress::common::ApiError;
use schoolpress::models::ResourceId;
use schoolpress::services::Session;
use schoolpress::types::AdminPublic;

pub const TOKEN: &str = "test-token";

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<Result<ApiResponse, ApiError>>,
}

/// Scripted backend. Replies for a route are served in order; the last one repeats.
/// Unscripted routes answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone())
    }

    fn push(&self, method: Method, path: &str, reply: Result<ApiResponse, ApiError>) {
        let mut routes = self.routes.lock().unwrap();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn fail(&self, method: Method, path: &str, err: ApiError) {
        self.push(method, path, Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.path == request.path)
        else {
            return Ok(ApiResponse::new(404, json!({"error": "Not found"}).to_string()));
        };

        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap()
        } else {
            route.replies.front().cloned().unwrap()
        }
    }
}

pub fn admin() -> AdminPublic {
    AdminPublic {
        id: Some(ResourceId(1)),
        email: "admin@school.ac.ke".to_string(),
    }
}

pub fn session() -> Session {
    Session::new(TOKEN.to_string(), admin(), Utc::now(), Duration::hours(1))
}

pub fn expired_session() -> Session {
    Session::new(
        TOKEN.to_string(),
        admin(),
        Utc::now() - Duration::hours(2),
        Duration::hours(1),
    )
}

pub fn stat_json(id: i64, key: &str, value: &str, category: &str) -> Value {
    json!({
        "id": id,
        "stat_key": key,
        "stat_value": value,
        "stat_label": null,
        "stat_category": category,
        "updated_at": "2025-01-01T00:00:00",
    })
}

pub fn seed_stats() -> Value {
    json!([
        stat_json(1, "students_count", "1200", "students"),
        stat_json(2, "teachers_count", "85", "staff"),
        stat_json(3, "kcse_mean_grade", "A-", "academics"),
    ])
}

pub fn news_json(id: i64, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "excerpt": format!("{} excerpt", title),
        "content": null,
        "category": category,
        "created_at": "2026-02-10T09:30:00.123456",
    })
}

pub fn gallery_json(id: i64, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "image_url": format!("https://img.example.com/{}.jpg", id),
        "title": title,
        "category": category,
        "created_at": "2026-01-15T12:00:00",
    })
}

pub fn seed_gallery() -> Value {
    json!([
        gallery_json(1, "Sports day", "Sports"),
        gallery_json(2, "Lab session", "Academics"),
        gallery_json(3, "Football finals", "Sports"),
        gallery_json(4, "Prize giving", "Events"),
    ])
}

pub fn staff_json(id: i64, name: &str, leadership: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "photo_url": null,
        "subject": "Mathematics",
        "email": null,
        "phone": null,
        "role": if leadership { "Principal" } else { "Teacher" },
        "is_leadership": leadership,
        "created_at": "2025-09-01T08:00:00",
    })
}

pub fn login_json() -> Value {
    json!({
        "access_token": TOKEN,
        "admin": { "id": 1, "email": "admin@school.ac.ke" },
    })
}
