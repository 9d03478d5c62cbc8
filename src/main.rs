//! Main entry point: configuration, logging, database pool and schema
//! setup, then the web server with request accounting wrapped around every
//! route.

use log::{info, warn};
use ntex::web;

use msg_inbox::{config, logger, repo, server, utils};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;

    logger::setup_simple_logger(&app_config.log_level)?;

    if !app_config.secret_configured() {
        warn!("WEBHOOK_SECRET not set - readiness check will fail");
    }

    let db_pool = utils::setup_sqlite_db_pool(&app_config.database_url).await?;
    repo::sqlite::init_schema(&db_pool).await?;
    info!("database initialized successfully");

    let sqlite_repo = repo::sqlite::SqlxSqliteRepo { db_pool };
    let webhook_secret = app_config.webhook_secret.clone();

    let server_addr = (app_config.http_host.as_str(), app_config.http_port);
    info!(
        "starting server on {host}:{port}",
        host = server_addr.0,
        port = server_addr.1
    );

    web::server(move || {
        web::App::new()
            .state(server::AppState {
                repo: Box::new(sqlite_repo.clone()),
                webhook_secret: webhook_secret.clone(),
            })
            .wrap(web::middleware::Compress::default())
            .wrap(server::middleware::RequestMetrics)
            .configure(server::routes::configure)
            .default_service(web::route().to(server::routes::not_found))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
