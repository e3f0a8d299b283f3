use super::post_controller::{
    cleanup_assets, delete_post, get_post, list_posts, posts_index, upsert_post,
};
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/upload", web::post().to(upsert_post))
        .route("/api/delete", web::post().to(delete_post))
        .route("/api/cleanup", web::post().to(cleanup_assets))
        .route("/api/posts", web::get().to(list_posts))
        .route("/posts.json", web::get().to(posts_index))
        .route("/posts/{id}", web::get().to(get_post));
}
