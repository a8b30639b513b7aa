use std::str::FromStr;

use axum::response::IntoResponse;
use axum::routing::any;
use axum::{Extension, Router};
use eyre::Result;
use log::info;
use refinery::config::Config as MigrationConfig;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::crypto::TokenIssuer;
use crate::extensions::ExtractEvent;
use crate::repository::users::UserRepository;
use crate::routes::Api;
use crate::service::auth::AuthService;
use crate::service::dashboard::DashboardService;

mod config;
mod crypto;
mod domain;
mod error;
mod extensions;
mod repository;
mod routes;
mod service;

refinery::embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // setup log
    env_logger::init();
    info!("server starts with logging");

    let config = Config::from_env()?;

    // run migrations
    let mut migration_config = MigrationConfig::from_str(&config.database_url)?;
    migrations::runner().run_async(&mut migration_config).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    // API
    let api = Api {
        auth_service: AuthService::new(
            UserRepository::new(pool),
            TokenIssuer::new(config.jwt_secret.as_bytes()),
        ),
        dashboard_service: DashboardService,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", config.bind_address);
    axum::serve(listener, app(api)).await?;
    Ok(())
}

fn app(api: Api) -> Router {
    Router::new()
        .route("/auth", any(auth))
        .route("/merchant-data", any(merchant_data))
        .layer(Extension(api))
}

async fn auth(
    Extension(api): Extension<Api>,
    ExtractEvent(event): ExtractEvent,
) -> impl IntoResponse {
    api.auth(event).await
}

async fn merchant_data(
    Extension(api): Extension<Api>,
    ExtractEvent(event): ExtractEvent,
) -> impl IntoResponse {
    api.merchant_data(event)
}
