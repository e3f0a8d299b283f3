use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use serde_json::json;

use crate::utils::config::service_name;

/// Rewrite framework errors (bad JSON bodies, wrong methods, ...) into the JSON envelope
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if super::is_json(&res) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status_code = res.status();
    let error_message = res
        .response()
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| status_code.canonical_reason().unwrap_or("Unknown error").to_string());

    let new_response = HttpResponse::build(status_code).json(json!({
        "success": false,
        "message": error_message,
        "httpStatusCode": status_code.as_u16(),
        "error": status_code
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_uppercase()
            .replace(' ', "_"),
        "service": service_name(),
    }));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
