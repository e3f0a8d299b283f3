use super::controller::generate_metadata;
use actix_web::web;

pub fn assist_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/ai-generate", web::post().to(generate_metadata));
}
