use crate::assist::index::assist_routes;
use crate::post::post_index::post_routes;
use crate::uploader::index::upload_routes;
use crate::utils::config::service_name;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

/// Articles are posted as JSON, so allow more than the framework default
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Phantom blog server is running",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": service_name(),
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(post_routes);
    cfg.configure(upload_routes);
    cfg.configure(assist_routes);
    cfg.route("/", web::get().to(welcome));
}
