//! Routes for the ORC wallet page ("Bet and Burn"): a tabbed panel
//! for the token balance, adding cash and the transactions ledger

use crate::{routes::layout, state::AppState};
use axum::{
    extract::Query,
    response::Html,
    routing::get,
    Router,
};
use indoc::{formatdoc, indoc};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new().route("/orc-wallet", get(wallet_page))
}

/// The tabs of the wallet page. The active tab is selected with the
/// `tab` query parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum WalletTab {
    #[default]
    Wallet,
    AddCash,
    Transactions,
}

/// All tabs in display order
const TABS: [WalletTab; 3] = [WalletTab::Wallet, WalletTab::AddCash, WalletTab::Transactions];

/// Rows of the fixed transactions ledger: label, amount and whether
/// the amount is a credit
const TRANSACTIONS: [(&str, &str, bool); 4] = [
    ("VLT Tournament Win", "-$45", false),
    ("VLT Tournament Win", "+$45", true),
    ("Cash Payout", "+$45", true),
    ("GM Tournament Win", "+$45", true),
];

impl WalletTab {
    /// Attempts to parse a tab from its query value
    fn try_parse(value: &str) -> Option<WalletTab> {
        Some(match value {
            "wallet" => Self::Wallet,
            "add-cash" => Self::AddCash,
            "transactions" => Self::Transactions,
            _ => return None,
        })
    }

    /// The value used for this tab in the `tab` query parameter
    fn query_value(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::AddCash => "add-cash",
            Self::Transactions => "transactions",
        }
    }

    /// The lowercase label shown on the tab button
    fn label(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::AddCash => "add cash",
            Self::Transactions => "transactions",
        }
    }

    /// The page title for this tab
    fn title(&self) -> &'static str {
        match self {
            Self::Wallet => "BET AND BURN (WALLET)",
            Self::AddCash => "BET AND BURN (ADD CASH)",
            Self::Transactions => "BET AND BURN (TRANSACTIONS)",
        }
    }
}

/// Query parameters for the wallet page
#[derive(Deserialize)]
struct WalletQuery {
    /// The selected tab, unknown values fall back to the wallet tab
    #[serde(default)]
    tab: Option<String>,
}

/// GET /orc-wallet
///
/// Renders the wallet page with the panel for the selected tab
async fn wallet_page(Query(query): Query<WalletQuery>) -> Html<String> {
    let tab = query
        .tab
        .as_deref()
        .and_then(WalletTab::try_parse)
        .unwrap_or_default();

    let tabs: String = TABS
        .iter()
        .map(|value| {
            let active = if *value == tab { " active" } else { "" };
            format!(
                r#"<a class="tab{active}" href="/orc-wallet?tab={value}">{label}</a>"#,
                value = value.query_value(),
                label = value.label(),
            )
        })
        .collect();

    let panel = match tab {
        WalletTab::Wallet => render_wallet_panel(),
        WalletTab::AddCash => render_add_cash_panel(),
        WalletTab::Transactions => render_transactions_panel(),
    };

    let content = formatdoc! {r#"
        <section class="wallet-page">
        <div class="wallet-header">
        <div class="brand-row">
        <img src="/assets/logo.svg" alt="ORC Logo">
        <span class="brand-text">ORC Wallet</span>
        </div>
        <a class="close" href="/" aria-label="Close">&times;</a>
        </div>
        <h1 class="wallet-title">{title}</h1>
        <div class="tabs-pill">
        {tabs}
        </div>
        {panel}
        </section>"#,
        title = tab.title(),
    };

    Html(layout::document(tab.title(), &content))
}

/// The token balance panel
fn render_wallet_panel() -> String {
    indoc! {r#"
        <div class="wallet-row">
        <div class="wallet-info">
        <div class="token-label">
        <img src="/assets/gimme-token.svg" alt="Gimmie Token">
        <span>Gimmie Tokens</span>
        </div>
        <div class="balance">520.00 GM</div>
        <div class="usd">$50.20 <span class="muted">$0.01/GM</span></div>
        </div>
        <button class="primary" type="button">Transfer</button>
        </div>"#}
    .to_string()
}

/// The add cash panel
fn render_add_cash_panel() -> String {
    indoc! {r#"
        <div class="add-cash">
        <div class="amount-pill">
        <span>$</span>
        <input value="0.00" aria-label="Amount in USD">
        <span>USD</span>
        </div>
        <label class="check-row">
        <input type="checkbox">
        <span>Add Cash to United States Dollar</span>
        </label>
        <div class="meta">
        <div class="muted">From</div>
        <div>Chimoney</div>
        </div>
        <button class="primary" type="button">Preview</button>
        </div>"#}
    .to_string()
}

/// The transactions ledger panel
fn render_transactions_panel() -> String {
    let rows: String = TRANSACTIONS
        .iter()
        .map(|(label, amount, credit)| {
            let class = if *credit { "credit" } else { "debit" };
            formatdoc! {r#"
                <li class="tx-item">
                <div>
                <div class="tx-title">{label}</div>
                <div class="tx-sub">ORC Wallet</div>
                </div>
                <div class="tx-amount {class}">{amount}</div>
                </li>"#}
        })
        .collect();

    formatdoc! {r#"
        <ul class="tx-list">
        {rows}
        </ul>"#}
}

#[cfg(test)]
mod test {
    use super::router;
    use crate::{
        services::{leaderboard::Leaderboard, Services},
        state::App,
    };
    use axum::{
        body::{to_bytes, Body},
        Router,
    };
    use hyper::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(App {
            services: Services {
                leaderboard: Leaderboard::new(None),
            },
        });
        router().with_state(state)
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_default_tab() {
        let (status, body) = get("/orc-wallet").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("BET AND BURN (WALLET)"));
        assert!(body.contains("520.00 GM"));
        assert!(body.contains("$0.01/GM"));
        assert!(body.contains("Transfer"));
    }

    #[tokio::test]
    async fn test_add_cash_tab() {
        let (_, body) = get("/orc-wallet?tab=add-cash").await;
        assert!(body.contains("BET AND BURN (ADD CASH)"));
        assert!(body.contains("Add Cash to United States Dollar"));
        assert!(body.contains("Chimoney"));
        assert!(body.contains("Preview"));
    }

    #[tokio::test]
    async fn test_transactions_tab() {
        let (_, body) = get("/orc-wallet?tab=transactions").await;
        assert!(body.contains("BET AND BURN (TRANSACTIONS)"));
        assert!(body.contains("Cash Payout"));
        assert!(body.contains("GM Tournament Win"));
        // One debit row and three credit rows
        assert_eq!(body.matches("debit").count(), 1);
        assert_eq!(body.matches("credit").count(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tab_falls_back() {
        let (status, body) = get("/orc-wallet?tab=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("BET AND BURN (WALLET)"));
    }

    #[tokio::test]
    async fn test_tab_links() {
        let (_, body) = get("/orc-wallet").await;
        assert!(body.contains("/orc-wallet?tab=wallet"));
        assert!(body.contains("/orc-wallet?tab=add-cash"));
        assert!(body.contains("/orc-wallet?tab=transactions"));
    }
}
