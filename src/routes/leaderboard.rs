//! Routes for the leaderboard: the podium page at the site root and
//! the JSON API exposing the ranked entries

use crate::{
    routes::layout,
    services::leaderboard::models::{shield_icon, MergedEntry, Podium, UserId},
    state::AppState,
    utils::flags::country_flag,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Router for the rendered podium page
pub fn page_router() -> Router<AppState> {
    Router::new().route("/", get(podium_page))
}

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /api/leaderboard
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/:user_id", get(get_user_ranking))
}

/// Error type used in leaderboard routes to handle errors such as
/// out of range queries and users missing from the board
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The provided query range was out of bounds on the underlying query
    #[error("Unacceptable query range")]
    InvalidRange,
    /// The requested user was not found in the leaderboard
    #[error("User not found")]
    UserNotFound,
}

/// Structure of a query requesting a window of the leaderboard
#[derive(Deserialize)]
pub struct LeaderboardQuery {
    /// The number of pages to offset by
    #[serde(default)]
    offset: usize,
    /// The number of items to query for count has a maximum limit
    /// of 255 entries to prevent server strain from querying the
    /// entire list of leaderboard entries
    count: Option<u8>,
}

/// The different types of responses that can be created
/// from a leaderboard request
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse<'a> {
    /// The total number of users in the entire leaderboard
    total: usize,
    /// The entries retrieved at the provided offset
    entries: &'a [MergedEntry],
    /// Whether there are more entries past the provided offset
    more: bool,
}

/// GET /api/leaderboard
///
/// Retrieves a window over the ranked leaderboard entries returning
/// the response or any errors
///
/// `query` The leaderboard query
async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, LeaderboardError> {
    let LeaderboardQuery { offset, count } = query;

    /// The default number of entries to return in a leaderboard response
    const DEFAULT_COUNT: u8 = 40;

    // The number of entries to return
    let count: usize = count.unwrap_or(DEFAULT_COUNT) as usize;
    // Calculate the starting index
    let start: usize = offset * count;

    let group = state.services.leaderboard.query().await;

    let (entries, more) = group
        .get_normal(start, count)
        .ok_or(LeaderboardError::InvalidRange)?;

    let response = Json(LeaderboardResponse {
        total: group.values.len(),
        entries,
        more,
    });

    Ok(response.into_response())
}

/// GET /api/leaderboard/:user_id
///
/// Retrieves the leaderboard entry for the user with the
/// provided user_id
///
/// `user_id` The ID of the user to find the leaderboard ranking of
async fn get_user_ranking(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Response, LeaderboardError> {
    let group = state.services.leaderboard.query().await;

    let entry = match group.get_entry(user_id) {
        Some(value) => value,
        None => return Err(LeaderboardError::UserNotFound),
    };

    let response = Json(entry);
    Ok(response.into_response())
}

/// IntoResponse implementation for LeaderboardError to allow it to be
/// used within the result type as a error response
impl IntoResponse for LeaderboardError {
    #[inline]
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidRange => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// GET /
///
/// Renders the podium page: the top three shields in display order
/// with the runner-up list beside them
async fn podium_page(State(state): State<AppState>) -> Html<String> {
    let group = state.services.leaderboard.query().await;
    let podium = Podium::new(&group.values);

    let top: String = podium
        .display_order()
        .iter()
        .map(|(position, entry)| render_top_slot(*position, *entry))
        .collect();

    let runner_ups: String = podium
        .runner_ups()
        .map(|(_, entry)| render_runner_up(entry))
        .collect();

    let content = formatdoc! {r#"
        <section class="podium-section">
        <h4>Best of Off-Road Champion</h4>
        <div class="podium-panel">
        <div class="podium">
        {top}
        </div>
        <div class="runner-ups">
        {runner_ups}
        </div>
        </div>
        </section>"#};

    Html(layout::document("Best of Off-Road Champion", &content))
}

/// Renders one of the three top podium slots. Empty slots render the
/// placeholder username and win count at reduced opacity.
fn render_top_slot(position: usize, entry: Option<&MergedEntry>) -> String {
    let first = if position == 1 { " first" } else { "" };
    let placeholder = if entry.is_none() { " placeholder" } else { "" };
    let icon = shield_icon(position);

    let username = match entry {
        Some(entry) => layout::escape(&entry.user.username),
        None => "-".to_string(),
    };
    let wins = match entry {
        Some(entry) => format!(r#"<span class="win-count">{}</span>W"#, entry.wins()),
        None => r#"<span class="muted">-</span>"#.to_string(),
    };
    let flag = match entry {
        Some(entry) => country_flag(entry.user.country_code.as_deref()),
        None => String::new(),
    };

    formatdoc! {r#"
        <div class="podium-slot{first}{placeholder}">
        <div class="shield">
        <img src="{icon}" alt="Position {position}">
        <div class="position-bubble">{position}</div>
        </div>
        <div class="username">{username}</div>
        <div class="wins">{wins}</div>
        <div class="flag">{flag}</div>
        </div>"#}
}

/// Renders a runner-up row (positions 4 through 11), all carrying the
/// winner shield
fn render_runner_up(entry: Option<&MergedEntry>) -> String {
    let placeholder = if entry.is_none() { " placeholder" } else { "" };

    let username = match entry {
        Some(entry) => layout::escape(&entry.user.username),
        None => "-".to_string(),
    };
    let wins = match entry {
        Some(entry) => format!(r#"{}<span class="win-count">W</span>"#, entry.wins()),
        None => r#"<span class="muted">-</span>"#.to_string(),
    };
    let flag = match entry {
        Some(entry) => country_flag(entry.user.country_code.as_deref()),
        None => String::new(),
    };

    formatdoc! {r#"
        <div class="runner-up{placeholder}">
        <div class="runner-info">
        <img class="runner-shield" src="/assets/winner.svg" alt="Shield">
        <span class="flag">{flag}</span>
        <span class="username">{username}</span>
        </div>
        <div class="wins">{wins}</div>
        </div>"#}
}
