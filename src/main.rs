use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use schoolpress::api::ApiClient;
use schoolpress::config::Settings;
use schoolpress::web::middleware::SecurityHeaders;
use schoolpress::web::{self, AppState};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    schoolpress::logging::init();

    let settings = Settings::from_env().map_err(|e| startup_error("invalid configuration", e))?;
    let api = ApiClient::http(&settings.api_base_url, settings.api_timeout)
        .map_err(|e| startup_error("could not build the API client", e))?;

    let bind_addr = settings.bind_addr.clone();
    let static_dir = settings.static_dir.clone();
    log::info!(
        "serving on {} against {} (timeout {:?})",
        bind_addr,
        settings.api_base_url,
        settings.api_timeout
    );

    let state = Data::new(AppState::new(api, settings));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(web::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
    })
    .bind(bind_addr)?
    .run()
    .await
}
