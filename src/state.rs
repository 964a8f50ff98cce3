use crate::{config::Config, services::Services};
use std::sync::Arc;

/// Shared application state handed to the router. Everything the
/// route handlers need lives behind this.
pub struct App {
    pub services: Services,
}

/// Type alias for the state extracted by the route handlers
pub type AppState = Arc<App>;

impl App {
    /// Creates the application state from the loaded config,
    /// initializing the underlying services
    pub async fn new(config: &Config) -> AppState {
        let services = Services::init(config).await;
        Arc::new(App { services })
    }
}
