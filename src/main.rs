use actix_web::{middleware, web, App, HttpServer};

use sealgate::audit::{self, AuditContext};
use sealgate::config;
use sealgate::error;
use sealgate::routes;
use sealgate::services::{CredentialMinter, RegistryService, ReportFetcher, SealNotifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("Starting Sealgate server on {}:{}", config.host, config.port);

    // Load the App signing key once; every platform call derives from it
    let pem = std::fs::read(&config.github.private_key_path).map_err(|e| {
        log::error!(
            "Failed to read private key {}: {}",
            config.github.private_key_path,
            e
        );
        e
    })?;

    let minter = CredentialMinter::from_pem(&config.github, &pem).map_err(|e| {
        log::error!("Failed to load private key: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let minter = web::Data::new(minter);

    let registry = web::Data::new(RegistryService::in_memory());
    let fetcher = web::Data::new(ReportFetcher::new(config.github.api_base.clone()));

    // Background audit worker; webhook handlers only enqueue
    let queue = audit::spawn_worker(AuditContext {
        registry: registry.get_ref().clone(),
        minter: minter.clone().into_inner(),
        fetcher: fetcher.get_ref().clone(),
        seal: SealNotifier::new(config.seal.endpoint_url.clone()),
    });
    let queue = web::Data::new(queue);

    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .app_data(minter.clone())
            .app_data(fetcher.clone())
            .app_data(queue.clone())
            .app_data(error::json_config())
            // Middleware
            .wrap(middleware::Logger::default())
            .configure(routes::health::configure)
            .configure(routes::registry::configure)
            .configure(routes::reports::configure)
            .configure(routes::webhook::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                // Wait forever if signal handler fails
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
