// src/config.rs
//! Service configuration, read once at startup and handed to constructors.

use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TRENDS_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub log_level: String,
    pub api_prefix: String,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,

    /// None means content generation runs in template mode
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    /// None disables the live trends source
    pub serpapi_api_key: Option<String>,
    pub trends_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Marketing Content Generator API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
            log_level: "INFO".to_string(),
            api_prefix: "/api/v1".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            serpapi_api_key: None,
            trends_base_url: DEFAULT_TRENDS_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Build settings from the process environment. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', using {}", raw, defaults.bind_addr.port());
                defaults.bind_addr.port()
            }),
            None => defaults.bind_addr.port(),
        };
        let ip = match get("HOST") {
            Some(raw) => raw
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .unwrap_or_else(|_| {
                    tracing::warn!("Invalid HOST '{}', using {}", raw, defaults.bind_addr.ip());
                    defaults.bind_addr.ip()
                }),
            None => defaults.bind_addr.ip(),
        };
        let bind_addr = SocketAddr::new(ip, port);

        let cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_origins);

        Self {
            debug: get("DEBUG").map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false),
            log_level: get("LOG_LEVEL")
                .map(|v| v.to_uppercase())
                .unwrap_or(defaults.log_level),
            bind_addr,
            cors_origins,
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            serpapi_api_key: get("SERPAPI_API_KEY"),
            trends_base_url: get("TRENDS_BASE_URL").unwrap_or(defaults.trends_base_url),
            ..defaults
        }
    }

    /// Default tracing filter derived from `LOG_LEVEL`.
    pub fn tracing_filter(&self) -> String {
        let level = match self.log_level.as_str() {
            "CRITICAL" | "ERROR" => "error",
            "WARNING" | "WARN" => "warn",
            "DEBUG" => "debug",
            "TRACE" => "trace",
            _ => "info",
        };
        format!("{level},marketing_content={level},reqwest=warn,hyper=warn,tower=warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.api_prefix, "/api/v1");
        assert_eq!(settings.bind_addr.port(), 8000);
        assert_eq!(settings.cors_origins.len(), 4);
        assert!(settings.openai_api_key.is_none());
        assert!(settings.serpapi_api_key.is_none());
        assert_eq!(settings.openai_model, "gpt-4o-mini");
        assert!(!settings.debug);
    }

    #[test]
    fn test_empty_keys_count_as_unset() {
        let settings = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "  "), ("SERPAPI_API_KEY", "")]));
        assert!(settings.openai_api_key.is_none());
        assert!(settings.serpapi_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DEBUG", "True"),
            ("LOG_LEVEL", "debug"),
            ("PORT", "9100"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ]));
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-test"));
        assert!(settings.debug);
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(settings.bind_addr.port(), 9100);
        assert_eq!(settings.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(settings.tracing_filter().starts_with("debug,"));
    }

    #[test]
    fn test_ipv6_host() {
        let settings = Settings::from_lookup(lookup(&[("HOST", "::"), ("PORT", "9000")]));
        assert_eq!(settings.bind_addr, "[::]:9000".parse::<SocketAddr>().unwrap());

        let settings = Settings::from_lookup(lookup(&[("HOST", "[::1]")]));
        assert_eq!(settings.bind_addr, "[::1]:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_bad_host_keeps_default() {
        let settings = Settings::from_lookup(lookup(&[("HOST", "not-an-ip"), ("PORT", "9000")]));
        assert_eq!(settings.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_bad_port_keeps_default() {
        let settings = Settings::from_lookup(lookup(&[("PORT", "not-a-port")]));
        assert_eq!(settings.bind_addr.port(), 8000);
    }
}
