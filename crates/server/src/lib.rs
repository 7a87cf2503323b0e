//! HTTP Server
//!
//! Exposes the model lifecycle over actix-web. Handlers validate request
//! bodies, call into the shared [`Manager`], and map every
//! [`Failure`](mls_lifecycle::Failure) to a status code with a JSON
//! `{error, detail, kind}` body.
//!
//! ## Routes
//!
//! - `GET /` and `GET /health`: service description and liveness
//! - `POST /train`, `POST /predict`, `GET /model/info`
//! - `GET|POST /monitoring/drift`: drift against the training baseline
//! - `GET /metrics`: request counters and uptime
mod config;
mod handlers;
mod rejection;

pub use config::*;
pub use handlers::*;
pub use rejection::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceFactory;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::middleware::Logger;
use actix_web::web;
use mls_lifecycle::Manager;

/// Route table.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::root))
        .route("/health", web::get().to(handlers::health))
        .route("/train", web::post().to(handlers::train))
        .route("/predict", web::post().to(handlers::predict))
        .route("/model/info", web::get().to(handlers::model_info))
        .route("/metrics", web::get().to(handlers::metrics))
        .service(
            web::resource("/monitoring/drift")
                .route(web::get().to(handlers::drift))
                .route(web::post().to(handlers::drift_with)),
        );
}

/// The full application around one shared manager: access log, CORS,
/// body limits and routes. The server builds one per worker.
pub fn app(
    manager: web::Data<Manager>,
    limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Logger::new("%r %s %Ts"))
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header(),
        )
        .app_data(manager)
        .app_data(json(limit))
        .configure(routes)
}

#[rustfmt::skip]
pub async fn run(config: Config) -> anyhow::Result<()> {
    for dir in config.directories() {
        std::fs::create_dir_all(dir)?;
    }
    let manager = web::Data::new(Manager::local(config.models.clone(), config.tracking.clone()));
    if config.restore {
        if let Err(e) = manager.restore().await {
            log::warn!("{:<24}{:#}", "restore failed", e);
        }
    }
    log::info!("{:<24}{}", "starting server", config.bind);
    let limit = config.body_limit;
    let server = HttpServer::new(move || app(manager.clone(), limit));
    let server = match config.workers {
        Some(n) => server.workers(n),
        None => server,
    };
    server.bind(&config.bind)?.run().await?;
    Ok(())
}
