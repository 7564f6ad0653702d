use std::env;
use std::path::PathBuf;

/// Runtime settings read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Shared with the auth service; signs and encrypts the session cookie.
    pub secret: Option<String>,
    /// Cookie domain, the session is shared with `*.{domain}`.
    pub domain: String,
    /// Directory uploaded recipe images are written to.
    pub media_root: PathBuf,
    /// Public URL prefix the media directory is served under.
    pub media_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT").unwrap_or("8080".to_string());
        let port = port.parse::<u16>().unwrap_or_else(|err| {
            log::warn!("Invalid PORT `{port}` ({err}), falling back to 8080");
            8080
        });

        let media_url = env::var("MEDIA_URL").unwrap_or("/media".to_string());

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or("app.db".to_string()),
            address: env::var("ADDRESS").unwrap_or("127.0.0.1".to_string()),
            port,
            secret: env::var("SECRET_KEY").ok(),
            domain: env::var("DOMAIN").unwrap_or("localhost".to_string()),
            media_root: PathBuf::from(env::var("MEDIA_ROOT").unwrap_or("./media".to_string())),
            media_url: media_url.trim_end_matches('/').to_string(),
        }
    }
}
