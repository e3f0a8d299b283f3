pub mod error_handler;
pub mod not_found;

/// Responses we built ourselves already carry the JSON envelope
fn is_json<B>(res: &actix_web::dev::ServiceResponse<B>) -> bool {
    res.headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}
