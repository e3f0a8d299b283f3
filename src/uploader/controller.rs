use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder, web};
use futures_util::StreamExt;
use log::{error, info};
use serde::Serialize;
use serde_json::json;

use crate::post::post_service::PostService;
use crate::storage::AssetStore;
use crate::storage::asset_store::is_safe_asset_name;
use crate::utils::error::AppError;
use crate::utils::uploads::{FileUpload, FileValidator};

/// Response for a stored image
#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
}

fn rejected(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": message.into(),
    }))
}

/// Pull the `image` field out of the form, refusing it once it grows past the limit
async fn extract_image_from_multipart(
    mut payload: Multipart,
    validator: &FileValidator,
) -> Result<Option<FileUpload>, String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Error reading multipart field: {}", e))?;

        let content_disposition = match field.content_disposition() {
            Some(cd) => cd,
            None => continue,
        };

        if content_disposition.get_name() != Some("image") {
            continue;
        }

        let file_name = content_disposition
            .get_filename()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let content_type = field.content_type().map(|ct| ct.essence_str().to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("Error reading file chunk: {}", e))?;
            data.extend_from_slice(&chunk);
            validator.check_size(data.len())?;
        }

        return Ok(Some(FileUpload::new(file_name, data, content_type)));
    }

    Ok(None)
}

/// Store an image for use as a cover or inline picture
/// POST /api/upload-image
pub async fn upload_image(
    payload: Multipart,
    post_service: web::Data<PostService>,
) -> impl Responder {
    let validator = FileValidator::images();

    let file = match extract_image_from_multipart(payload, &validator).await {
        Ok(Some(f)) => f,
        Ok(None) => return rejected("No image provided"),
        Err(e) => return rejected(e),
    };

    if let Err(e) = validator.validate(&file) {
        return rejected(e);
    }

    // validate() guarantees an extension
    let extension = file.extension().unwrap_or_default();

    match post_service.assets().save(&extension, &file.data) {
        Ok(filename) => {
            info!(
                "Stored image {} as {} ({} bytes)",
                file.file_name,
                filename,
                file.size()
            );
            HttpResponse::Ok().json(ImageUploadResponse {
                success: true,
                url: AssetStore::public_url(&filename),
                filename,
            })
        }
        Err(e) => {
            error!("Failed to store image {}: {}", file.file_name, e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": format!("Failed to store image: {}", e),
            }))
        }
    }
}

fn mime_for_ext(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Serve a stored image
/// GET /uploads/images/{filename}
pub async fn serve_image(
    path: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    let filename = path.into_inner();

    if !is_safe_asset_name(&filename) {
        return Err(AppError::BadRequestError("Invalid filename".into()));
    }

    let bytes = post_service
        .assets()
        .read(&filename)?
        .ok_or_else(|| AppError::NotFoundError("Image not found".into()))?;

    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    Ok(HttpResponse::Ok()
        .content_type(mime_for_ext(&ext))
        .body(bytes))
}
