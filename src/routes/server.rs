//! Routes that serve information about the server such as the
//! version and identity

use crate::{config::VERSION, state::AppState};
use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /api/server
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(server_details))
}

/// Response detailing the identity of the server, the name of the
/// service and its version
#[derive(Serialize)]
struct ServerDetails {
    /// Identifier used to verify the server is an ORC website server
    ident: &'static str,
    /// The server version
    version: &'static str,
}

/// GET /api/server
///
/// Handle for obtaining the server details
async fn server_details() -> Json<ServerDetails> {
    Json(ServerDetails {
        ident: "ORC_WEB_SERVER",
        version: VERSION,
    })
}
