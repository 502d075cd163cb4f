use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use refchat_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Extraction finishes (or aborts startup) before anything is bound.
    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Refusing to start: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let host = state.config.web_server_host.clone();
    let port = state.config.web_server_port;
    let cors_origin = state.config.cors_allowed_origin.clone();
    let data = web::Data::new(state);

    log::info!("Starting HTTP server on http://{}:{}", host, port);
    log::info!("Chat endpoint: POST http://{}:{}/responder", host, port);

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST"])
                .allow_any_header(),
            None => Cors::default(),
        };

        App::new()
            .app_data(data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
