use crate::assist::assist_client::AssistClient;
use crate::utils::error::AppError;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub content: String,
}

/// Propose title, summary and tags for a draft
/// POST /api/ai-generate
pub async fn generate_metadata(
    assist_client: web::Data<AssistClient>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    if body.content.trim().chars().count() < 10 {
        return Err(AppError::ValidationError(
            "Content too short to analyze".into(),
        ));
    }

    let (suggestion, degraded) = assist_client.suggest(&body.content).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "degraded": degraded,
        "data": suggestion,
    })))
}
