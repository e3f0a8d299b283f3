use crate::post::listing::{DEFAULT_PAGE_SIZE, PostListing};
use crate::post::post_model::{DeletePostRequest, UpsertPostRequest, validate_post_id};
use crate::post::post_service::{PostService, UpsertOutcome};
use crate::utils::config::AppConfig;
use crate::utils::error::AppError;
use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Deserialize;
use serde_json::json;
use std::fs;

/// Used when no viewer page is deployed next to the server
const FALLBACK_VIEWER_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Post</title>
</head>
<body>
  <article id="post-content"></article>
  <script>
    const id = location.pathname.split('/').pop();
    fetch('/posts/' + encodeURIComponent(id) + '.md')
      .then(r => r.ok ? r.text() : Promise.reject(r.status))
      .then(md => { document.getElementById('post-content').textContent = md; });
  </script>
</body>
</html>
"#;

/// Create or edit a post
/// POST /api/upload
pub async fn upsert_post(
    post_service: web::Data<PostService>,
    body: web::Json<UpsertPostRequest>,
) -> Result<HttpResponse, AppError> {
    let (record, outcome) = post_service.upsert_post(body.into_inner()).await?;

    let message = match outcome {
        UpsertOutcome::Created => "Post created successfully",
        UpsertOutcome::Updated => "Post updated successfully",
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "id": record.id,
    })))
}

/// Delete a post and its Markdown file
/// POST /api/delete
pub async fn delete_post(
    post_service: web::Data<PostService>,
    body: web::Json<DeletePostRequest>,
) -> Result<HttpResponse, AppError> {
    let removed = post_service.delete_post(&body.id).await?;
    let message = if removed {
        "Post deleted successfully"
    } else {
        "Post already deleted"
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
    })))
}

/// Delete uploaded images no post refers to any more
/// POST /api/cleanup
pub async fn cleanup_assets(post_service: web::Data<PostService>) -> Result<HttpResponse, AppError> {
    let report = post_service.reclaim_assets().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Cleanup complete. Deleted {} unused file(s).", report.deleted.len()),
        "spaceReclaimed": report.space_reclaimed(),
        "deleted": report.deleted,
    })))
}

/// The raw index
/// GET /posts.json
pub async fn posts_index(post_service: web::Data<PostService>) -> Result<HttpResponse, AppError> {
    let posts = post_service.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Filtered, searched and paginated view of the index
/// GET /api/posts
pub async fn list_posts(
    post_service: web::Data<PostService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let posts = post_service.list_posts().await?;

    let mut listing = PostListing::new(posts, query.per_page.unwrap_or(DEFAULT_PAGE_SIZE));
    // a search query replaces the category filter
    match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => listing.search(q),
        None => listing.filter_by_category(query.category.as_deref().unwrap_or("")),
    }
    let page = listing.page(query.page.unwrap_or(1));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "items": page.items,
        "page": page.page,
        "totalPages": page.total_pages,
        "total": page.total,
    })))
}

/// `/posts/<id>.md` is the Markdown body, `/posts/<id>` the viewer page
/// GET /posts/{id}
pub async fn get_post(
    path: web::Path<String>,
    post_service: web::Data<PostService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let requested = path.into_inner();

    if !requested.contains('.') {
        let shell = match fs::read_to_string(&config.viewer_shell) {
            Ok(html) => html,
            Err(_) => FALLBACK_VIEWER_SHELL.to_string(),
        };
        return Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(shell));
    }

    let id = requested
        .strip_suffix(".md")
        .ok_or_else(|| AppError::NotFoundError(format!("File {} not found", requested)))?;
    validate_post_id(id).map_err(|_| AppError::NotFoundError("Post not found".into()))?;

    let body = post_service
        .contents()
        .read(id)?
        .ok_or_else(|| AppError::NotFoundError("Post not found".into()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/markdown; charset=utf-8")
        .body(body))
}
