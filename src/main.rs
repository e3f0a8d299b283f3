use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use env_logger::Env;
use log::info;

use phantom_blog::assist::assist_client::AssistClient;
use phantom_blog::middleware::error_handler::handle_error;
use phantom_blog::middleware::not_found::not_found;
use phantom_blog::post::post_service::PostService;
use phantom_blog::router::index::{JSON_BODY_LIMIT, routes};
use phantom_blog::utils::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    info!(
        "Posts in {}, index at {}, images in {}",
        config.posts_dir.display(),
        config.index_file.display(),
        config.uploads_dir.display()
    );

    let post_service = web::Data::new(PostService::new(&config));
    let assist_client = web::Data::new(AssistClient::new(config.assist.clone()));
    let app_config = web::Data::new(config.clone());

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .app_data(post_service.clone())
            .app_data(assist_client.clone())
            .app_data(app_config.clone())
            .configure(routes)
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::NOT_FOUND, not_found)
                    .default_handler(handle_error),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
