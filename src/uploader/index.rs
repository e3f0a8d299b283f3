use super::controller::{serve_image, upload_image};
use actix_web::web;

pub fn upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/upload-image", web::post().to(upload_image))
        .route("/uploads/images/{filename}", web::get().to(serve_image));
}
