//! Routes for the NFT marketplace page

use crate::{routes::layout, state::AppState};
use axum::{response::Html, routing::get, Router};
use indoc::formatdoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/nft-marketplace", get(marketplace_page))
}

/// The collection stats shown under the hero section
const MARKET_STATS: [(&str, &str); 4] = [
    ("Floor Price", "2.00 ETH"),
    ("Top Offer", "30.00 ETH"),
    ("Total Volume", "910,200 ETH"),
    ("Owners", "35,000"),
];

/// Number of listing cards shown in the grid
const LISTING_COUNT: u32 = 8;
/// Token number of the first listing card
const FIRST_LISTING: u32 = 3900;
/// Asking price shown on every listing card
const LISTING_PRICE: &str = "1.20 ETH";

/// GET /nft-marketplace
///
/// Renders the marketplace page: hero, collection stats and the
/// listing grid
async fn marketplace_page() -> Html<String> {
    let stats: String = MARKET_STATS
        .iter()
        .map(|(label, value)| {
            formatdoc! {r#"
                <div class="stat">
                <p class="stat-label">{label}</p>
                <p class="stat-value">{value}</p>
                </div>"#}
        })
        .collect();

    let listings: String = (0..LISTING_COUNT)
        .map(|index| {
            formatdoc! {r#"
                <div class="listing-card">
                <div class="listing-image">NFT Image</div>
                <div class="listing-body">
                <h3>Off-Road Champion #{number}</h3>
                <p>{price}</p>
                </div>
                </div>"#,
                number = FIRST_LISTING + index,
                price = LISTING_PRICE,
            }
        })
        .collect();

    let content = formatdoc! {r#"
        <section class="marketplace">
        <div class="hero">
        <div class="hero-overlay">
        <h1>OFF-ROAD CHAMPION NFT MARKETPLACE</h1>
        <p>A new era of interactive digital collectibles built for the Off-Road Champion universe.</p>
        </div>
        </div>
        <div class="stats-row">
        {stats}
        </div>
        <div class="listing-grid">
        {listings}
        </div>
        </section>"#};

    Html(layout::document("Off-Road Champion NFT Marketplace", &content))
}

#[cfg(test)]
mod test {
    use super::{router, LISTING_COUNT};
    use crate::{
        services::{leaderboard::Leaderboard, Services},
        state::App,
    };
    use axum::body::{to_bytes, Body};
    use hyper::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn get_page() -> (StatusCode, String) {
        let state = Arc::new(App {
            services: Services {
                leaderboard: Leaderboard::new(None),
            },
        });
        let app = router().with_state(state);

        let req = Request::builder()
            .uri("/nft-marketplace")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_marketplace_page() {
        let (status, body) = get_page().await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("OFF-ROAD CHAMPION NFT MARKETPLACE"));
        assert!(body.contains("910,200 ETH"));
        assert!(body.contains("35,000"));

        // The grid runs from #3900 to #3907
        assert_eq!(body.matches("listing-card").count() as u32, LISTING_COUNT);
        assert!(body.contains("Off-Road Champion #3900"));
        assert!(body.contains("Off-Road Champion #3907"));
        assert!(!body.contains("Off-Road Champion #3908"));
    }
}
