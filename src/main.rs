use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use dotenvy::dotenv;

use pushkind_recipes::db::{establish_connection_pool, run_migrations};
use pushkind_recipes::images::FsImageStore;
use pushkind_recipes::models::config::ServerConfig;
use pushkind_recipes::repository::DieselRepository;
use pushkind_recipes::routes::{self, ErrorBody};

/// Upper bound for JSON bodies; recipe images travel inline as base64.
const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match &config.secret {
        Some(key) => match Key::try_from(key.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                log::error!("SECRET_KEY is unusable: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("SECRET_KEY is not set, sessions issued by the auth service will be rejected");
            Key::generate()
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }
    let repo = DieselRepository::new(pool);

    if let Err(e) = std::fs::create_dir_all(&config.media_root) {
        log::error!(
            "Failed to create media directory {}: {e}",
            config.media_root.display()
        );
        std::process::exit(1);
    }
    let images = FsImageStore::new(config.media_root.clone(), config.media_url.clone());

    let json_config = web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let detail = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorBody::new(detail)),
            )
            .into()
        });

    let bind_address = (config.address.clone(), config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new(&config.media_url, &config.media_root))
            .configure(routes::configure)
            .app_data(json_config.clone())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(images.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
