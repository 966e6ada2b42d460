use actix_cors::Cors;
use actix_governor::{
    governor::middleware::NoOpMiddleware, GovernorConfig, GovernorConfigBuilder,
    PeerIpKeyExtractor,
};
use actix_web::web;
use diesel::{pg::PgConnection, r2d2::ConnectionManager};

use crate::config::Config;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod service;
pub mod store;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Any origin, method and header may call the API.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Per-peer limiter: `rate_limit_burst` requests up front, then
/// `rate_limit_per_second` sustained. `None` when either value is zero.
pub fn rate_limiter(
    config: &Config,
) -> Option<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    GovernorConfigBuilder::default()
        .period(config.replenish_interval())
        .burst_size(config.rate_limit_burst)
        .finish()
}

/// Mounts the note routes; `/notas` and `/notas/` are both accepted.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error))
        .route("/", web::get().to(handlers::index))
        .service(
            web::scope("/notas")
                .route("", web::get().to(handlers::note::list))
                .route("", web::post().to(handlers::note::new))
                .route("/", web::get().to(handlers::note::list))
                .route("/", web::post().to(handlers::note::new))
                .route("/{id}", web::get().to(handlers::note::get))
                .route("/{id}", web::put().to(handlers::note::update))
                .route("/{id}", web::delete().to(handlers::note::delete)),
        );
}
