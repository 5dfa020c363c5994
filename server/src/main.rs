use axum::{
    extract::Host,
    http::Uri,
    response::{IntoResponse, Redirect},
    Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

mod config;
mod database;
mod error;
mod log_requests;
mod logs;
mod player_service;
mod players;
mod rate_limit;
mod repository;
mod server_init;
mod validation;

use config::{Config, TlsConfig};
use database::Database;
use player_service::PlayerService;

#[derive(Clone)]
pub struct AppState {
    pub players: Arc<PlayerService>,
}

async fn redirect_to_https(Host(host): Host, uri: Uri) -> impl IntoResponse {
    // Drop any port, the HTTPS listener uses the standard one
    let host = host.split(':').next().unwrap_or(&host);

    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let uri = format!("https://{host}{path}");
    Redirect::permanent(&uri)
}

async fn serve_http(addr: &str, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server running on {addr}");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
}

async fn serve_https(config: &Config, tls: &TlsConfig, app: Router) -> std::io::Result<()> {
    let redirect_app = Router::new().fallback(redirect_to_https);
    let http_addr = config.http_addr.clone();
    let http_future = async move {
        let listener = tokio::net::TcpListener::bind(&http_addr).await?;
        log::info!("HTTP redirect server running on {http_addr}");
        axum::serve(listener, redirect_app).await
    };

    let rustls = axum_server::tls_rustls::RustlsConfig::from_pem_file(
        PathBuf::from(&tls.cert_path),
        PathBuf::from(&tls.key_path),
    )
    .await?;
    let https_addr: SocketAddr = config
        .https_addr
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let https_future = async move {
        log::info!("HTTPS server running on {https_addr}");
        axum_server::bind_rustls(https_addr, rustls)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
    };

    tokio::try_join!(http_future, https_future)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    logs::init_logger(&config.log_level, config.log_file_path.as_deref())?;
    log::info!("Word game player service starting...");

    let db = Database::new(&config.database_url).await?;
    db.initialize().await?;
    log::info!(
        "Database ready at {} with {} players",
        config.database_url,
        db.count_players().await?
    );

    let mut app = server_init::build_router(server_init::build_state(db));
    match rate_limit::create_rate_limiter(config.rate_limit_per_second) {
        Some(limiter) => app = app.layer(limiter),
        None => log::warn!("Rate limiting disabled"),
    }

    match &config.tls {
        Some(tls) => {
            log::info!("SSL certificates found, starting HTTPS server...");
            serve_https(&config, tls, app).await?;
        }
        None => {
            log::info!("No SSL certificates found, starting HTTP-only server...");
            serve_http(&config.http_addr, app).await?;
        }
    }

    Ok(())
}
