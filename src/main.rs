use std::{io, sync::Arc};

use actix_governor::Governor;
use actix_web::{middleware::Logger, web, App, HttpServer};

use notas::{
    config::{Config, StoreKind},
    errors::ServerError,
    service::NoteService,
    store::{MemoryNoteStore, NoteStore, PgNoteStore},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(startup_error)?;
    let store: Arc<dyn NoteStore> = match config.store {
        StoreKind::Postgres => {
            let database_url = config.database_url.as_deref().unwrap_or_default();
            let store =
                PgNoteStore::connect(database_url, config.pool_size).map_err(startup_error)?;
            store.run_migrations().map_err(startup_error)?;
            Arc::new(store)
        }
        StoreKind::Memory if config.seed_example_note => Arc::new(MemoryNoteStore::seeded()),
        StoreKind::Memory => Arc::new(MemoryNoteStore::new()),
    };
    log::info!("using {} note store", store.kind());
    if config.store == StoreKind::Memory {
        log::warn!("notes are kept in memory and will be lost on restart");
    }

    let service = web::Data::new(NoteService::new(store));
    let governor_conf = notas::rate_limiter(&config).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be positive",
        )
    })?;

    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(notas::cors())
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .configure(notas::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn startup_error(err: ServerError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("startup failed: {}", err))
}
