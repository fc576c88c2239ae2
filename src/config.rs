use std::env;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: u64 = 1;
pub const DEFAULT_PORT: u16 = 8080;

/// Settings resolved once at startup and handed to the fetcher and server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub user_id: u64,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn new(api_url: impl Into<String>, user_id: u64) -> Self {
        Self {
            api_url: normalize_base(api_url.into()),
            user_id,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(normalize_base)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let user_id = match lookup("USER_ID") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!("ignoring invalid USER_ID {raw:?}, using {DEFAULT_USER_ID}");
                DEFAULT_USER_ID
            }),
            None => DEFAULT_USER_ID,
        };

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            api_url,
            user_id,
            port,
        }
    }

    pub fn stats_url(&self) -> String {
        format!("{}/user/{}/stats", self.api_url, self.user_id)
    }
}

fn normalize_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.stats_url(), "http://localhost:8000/user/1/stats");
    }

    #[test]
    fn reads_overrides_and_trims_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_URL", "http://backend:9000/"),
            ("USER_ID", "42"),
            ("PORT", "3000"),
        ]));
        assert_eq!(config.api_url, "http://backend:9000");
        assert_eq!(config.user_id, 42);
        assert_eq!(config.port, 3000);
        assert_eq!(config.stats_url(), "http://backend:9000/user/42/stats");
    }

    #[test]
    fn invalid_user_id_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("USER_ID", "abc")]));
        assert_eq!(config.user_id, DEFAULT_USER_ID);
    }
}
