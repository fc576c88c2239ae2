use crate::charts::ChartEngine;
use crate::config::Config;
use crate::document::Document;
use crate::errors::FetchError;
use crate::models::StatsPayload;
use crate::render::render_stats;
use reqwest::Client;
use tracing::{error, info};

/// Reads one user's stats from the backend.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: Client,
    url: String,
}

impl StatsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            url: config.stats_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_stats(&self) -> Result<StatsPayload, FetchError> {
        let transport = |source| FetchError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self.http.get(&self.url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// One fetch-then-render pass. Failures are logged and leave `doc` untouched.
pub async fn load_dashboard<E: ChartEngine>(client: &StatsClient, doc: &mut Document<E>) {
    match client.fetch_stats().await {
        Ok(payload) => {
            render_stats(doc, &payload);
            info!(url = client.url(), "dashboard rendered");
        }
        Err(err) => error!("error fetching user stats: {err}"),
    }
}
