//! Module for retrieving the leaderboard feeds from the upstream
//! data source

use crate::{
    config::UpstreamConfig,
    services::leaderboard::models::{RaceStats, UserProfile},
};
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Client for the upstream service supplying the feeds that are
/// merged into leaderboard entries
pub struct Retriever {
    /// Base URL of the upstream service, always slash terminated
    base_url: String,
    /// The underlying HTTP client
    http: reqwest::Client,
}

/// Errors that can occur while requesting an upstream feed
#[derive(Debug, Error)]
pub enum RetrieverError {
    /// The request itself failed or the upstream answered with an
    /// error status
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl Retriever {
    /// Route supplying the user identity and profile feed
    const PROFILES_ROUTE: &'static str = "api/leaderboard/profiles";
    /// Route supplying the per-user race statistics feed
    const RACES_ROUTE: &'static str = "api/leaderboard/races";

    /// Creates the retriever for the configured upstream. None when
    /// no upstream base URL is set, in which case the leaderboard
    /// stays empty.
    pub fn new(config: &UpstreamConfig) -> Option<Retriever> {
        let base_url = config.base_url.as_ref()?;

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        debug!("Upstream leaderboard source: {}", base_url);

        Some(Retriever {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Requests the profile feed from the upstream
    pub async fn profiles(&self) -> Result<Vec<UserProfile>, RetrieverError> {
        self.get(Self::PROFILES_ROUTE).await
    }

    /// Requests the race statistics feed from the upstream
    pub async fn races(&self) -> Result<Vec<RaceStats>, RetrieverError> {
        self.get(Self::RACES_ROUTE).await
    }

    /// Requests the JSON resource at the provided route relative to
    /// the upstream base URL
    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, RetrieverError> {
        let url = format!("{}{}", self.base_url, route);
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod test {
    use super::Retriever;
    use crate::config::UpstreamConfig;

    #[test]
    fn test_disabled_without_base_url() {
        assert!(Retriever::new(&UpstreamConfig::default()).is_none());
    }

    #[test]
    fn test_base_url_normalized() {
        let config = UpstreamConfig {
            base_url: Some("https://api.offroading.teto.dev".to_string()),
        };
        let retriever = Retriever::new(&config).expect("Missing retriever");
        assert!(retriever.base_url.ends_with('/'));
    }
}
