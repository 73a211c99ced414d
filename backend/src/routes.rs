use crate::inference::InferenceAdapter;
use crate::upload::{UploadLimits, calculate_image_hash, read_image};
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use log::{error, info, warn};
use serde_json::json;
use shared::PredictionResponse;
use std::path::PathBuf;
use uuid::Uuid;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf, assets_dir: PathBuf) {
    configure_api(cfg);
    cfg.service(Files::new("/assets", assets_dir))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/api/model").route(web::get().to(model_info)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_predict(
    adapter: web::Data<InferenceAdapter>,
    limits: web::Data<UploadLimits>,
    payload: Multipart,
) -> Result<HttpResponse, Error> {
    let request_id = Uuid::new_v4();

    let image_data = read_image(payload, **limits).await.map_err(|e| {
        warn!("[{}] rejected upload: {}", request_id, e);
        e
    })?;
    let image_hash = calculate_image_hash(&image_data);
    info!(
        "[{}] received {} bytes (sha256 {})",
        request_id,
        image_data.len(),
        &image_hash[..12]
    );

    let model = adapter.clone();
    let result = web::block(move || model.predict(&image_data)).await?;

    match result {
        Ok(prediction) => {
            info!(
                "[{}] {} with confidence {} (score {:.4})",
                request_id, prediction.label, prediction.confidence, prediction.score
            );
            Ok(HttpResponse::Ok().json(PredictionResponse {
                request_id: request_id.to_string(),
                label: prediction.label,
                label_text: prediction.label.display_name().to_string(),
                confidence: prediction.confidence,
                score: prediction.score,
                image_hash,
            }))
        }
        Err(e) => {
            error!("[{}] {}", request_id, e);
            Err(e.into())
        }
    }
}

async fn model_info(adapter: web::Data<InferenceAdapter>) -> HttpResponse {
    HttpResponse::Ok().json(adapter.model_info())
}

async fn health(adapter: web::Data<InferenceAdapter>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "backend": adapter.backend_name(),
    }))
}
