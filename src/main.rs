mod config;
mod logging;
mod middleware;
mod routes;
mod servers;
mod services;
mod state;
mod utils;

use crate::state::App;
use log::info;
use tokio::{select, signal};

#[tokio::main]
async fn main() {
    let config = config::load_config().unwrap_or_default();

    logging::setup(config.logging);

    info!("Starting Off-Road Champion website v{}", config::VERSION);

    // Crypto provider used by the TLS acceptor and the outbound client
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let app = App::new(&config).await;
    let router = routes::router(app);

    select! {
        _ = servers::https::start_server(config, router) => {}
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }
}
