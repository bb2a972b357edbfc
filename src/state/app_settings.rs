use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;
use swehockey_api::client::{DEFAULT_BASE_URL, DEFAULT_RATE_LIMIT};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub base_url: String,
    pub rate_limit: Duration,
    pub poll_interval: Duration,
    pub log_level: Option<LevelFilter>,
    /// Values that did not parse and fell back to defaults. Logged once the logger is up.
    pub warnings: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_level: None,
            warnings: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("HOCKEY_TICKER_BASE_URL") {
            settings.base_url = url.trim().to_string();
        }
        if let Some(ms) = settings.parse_or_warn::<u64>("HOCKEY_TICKER_RATE_LIMIT_MS", var("HOCKEY_TICKER_RATE_LIMIT_MS")) {
            settings.rate_limit = Duration::from_millis(ms);
        }
        if let Some(secs) = settings.parse_or_warn::<u64>("HOCKEY_TICKER_POLL_SECS", var("HOCKEY_TICKER_POLL_SECS")) {
            if secs == 0 {
                settings.warnings.push("HOCKEY_TICKER_POLL_SECS must be positive, using 30".into());
            } else {
                settings.poll_interval = Duration::from_secs(secs);
            }
        }
        settings.log_level = settings.parse_or_warn::<LevelFilter>("HOCKEY_TICKER_LOG", var("HOCKEY_TICKER_LOG"));
        settings
    }

    fn parse_or_warn<T: FromStr>(&mut self, key: &str, raw: Option<String>) -> Option<T> {
        let raw = raw?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.warnings.push(format!("ignoring {key}={raw:?}: not a valid value"));
                None
            }
        }
    }
}
