use crate::config::Config;
use crate::fetcher::StatsClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<StatsClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(StatsClient::new(config)),
        }
    }
}
