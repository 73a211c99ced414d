mod config;
mod inference;
mod routes;
mod upload;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use inference::InferenceAdapter;
use routes::configure_routes;
use std::env;
use upload::UploadLimits;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::load().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e))
    })?;

    log::info!(
        "Model: {} ({} backend, input {}x{}x{}, {:?} resampling)",
        config.model.path.display(),
        config.model.backend,
        config.model.input_width,
        config.model.input_height,
        config.model.channels,
        config.model.resize_filter
    );

    // Loaded once; every worker shares the same read-only model.
    let adapter = match InferenceAdapter::load(&config.model) {
        Ok(adapter) => adapter,
        Err(e) => {
            log::error!("Failed to load model at startup: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Model loading failed: {}", e),
            ));
        }
    };
    log::info!("Model loaded with the {} backend", adapter.backend_name());

    let adapter = web::Data::new(adapter);
    let limits = web::Data::new(UploadLimits {
        max_bytes: config.max_upload_bytes,
    });
    let frontend_dir = config.frontend_dir.clone();
    let assets_dir = config.assets_dir.clone();

    if !frontend_dir.is_dir() {
        log::warn!(
            "Frontend build not found at {}; only the API will be served",
            frontend_dir.display()
        );
    }

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(adapter.clone())
            .app_data(limits.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone(), assets_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
