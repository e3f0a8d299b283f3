use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use serde_json::json;

use crate::utils::config::service_name;

pub fn not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if super::is_json(&res) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let new_response = HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "success": false,
        "message": "Route does not exist",
        "httpStatusCode": StatusCode::NOT_FOUND.as_u16(),
        "error": "NOT_FOUND_ERROR",
        "service": service_name(),
    }));
    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
