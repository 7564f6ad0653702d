//! Imports ingredient and tag catalogs into the database.
//!
//! ```text
//! load_data ingredients data/ingredients.json
//! load_data tags data/tags.csv
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;

use pushkind_recipes::db::{DbError, establish_connection_pool, run_migrations};
use pushkind_recipes::forms::catalog::{CatalogError, CatalogFormat, CatalogUpload};
use pushkind_recipes::models::config::ServerConfig;
use pushkind_recipes::repository::errors::RepositoryError;
use pushkind_recipes::repository::{DieselRepository, IngredientWriter, TagWriter};

#[derive(Debug, Parser)]
#[command(about = "Load catalog data from JSON or CSV files")]
struct Cli {
    #[command(subcommand)]
    catalog: Catalog,
}

#[derive(Debug, Subcommand)]
enum Catalog {
    /// Get-or-create ingredients keyed by name and measurement unit.
    Ingredients { file: PathBuf },
    /// Insert tags, skipping ones whose name, color or slug is taken.
    Tags { file: PathBuf },
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("database setup failed: {0}")]
    Db(#[from] DbError),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },
    #[error("failed to store catalog: {0}")]
    Repository(#[from] RepositoryError),
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let cli = Cli::parse();
    if let Err(err) = run(cli.catalog) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(catalog: Catalog) -> Result<(), LoadError> {
    let config = ServerConfig::from_env();
    let pool = establish_connection_pool(&config.database_url)?;
    run_migrations(&pool)?;
    let repo = DieselRepository::new(pool);

    match catalog {
        Catalog::Ingredients { file } => {
            let ingredients = read_upload(&file)?
                .into_new_ingredients()
                .map_err(|source| invalid_catalog(&file, source))?;
            let created = repo.create_ingredients(&ingredients)?;
            log::info!(
                "Loaded {} ingredients from {}, {created} new",
                ingredients.len(),
                file.display()
            );
        }
        Catalog::Tags { file } => {
            let tags = read_upload(&file)?
                .into_new_tags()
                .map_err(|source| invalid_catalog(&file, source))?;
            let created = repo.create_tags(&tags)?;
            log::info!(
                "Loaded {} tags from {}, {created} new",
                tags.len(),
                file.display()
            );
        }
    }

    Ok(())
}

fn read_upload(file: &Path) -> Result<CatalogUpload, LoadError> {
    let format = CatalogFormat::from_path(file).map_err(|source| invalid_catalog(file, source))?;
    let bytes = std::fs::read(file).map_err(|source| LoadError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(CatalogUpload::new(format, bytes))
}

fn invalid_catalog(file: &Path, source: CatalogError) -> LoadError {
    LoadError::Catalog {
        path: file.to_path_buf(),
        source,
    }
}
