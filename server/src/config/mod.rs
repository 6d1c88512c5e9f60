use std::env;
use std::fmt::Display;
use std::str::FromStr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/marketplace";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PLATFORM_FEE_BPS: u32 = 500;
const MAX_FEE_BPS: u32 = 10_000;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub platform_fee_bps: u32,
    pub allowed_origins: Vec<String>,
    /// Enables HSTS.
    pub production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            production: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let platform_fee_bps = parse_var("PLATFORM_FEE_BPS", DEFAULT_PLATFORM_FEE_BPS);
        let platform_fee_bps = if platform_fee_bps > MAX_FEE_BPS {
            tracing::warn!(
                "PLATFORM_FEE_BPS={} exceeds 100%, using default {}",
                platform_fee_bps,
                DEFAULT_PLATFORM_FEE_BPS
            );
            DEFAULT_PLATFORM_FEE_BPS
        } else {
            platform_fee_bps
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: parse_var("PORT", DEFAULT_PORT),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            platform_fee_bps,
            allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            production: env::var("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        }
    }
}

/// Reads `key`, falling back to `default` when unset or unparsable.
fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {} value '{}': {}, using default {}", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        std::env::set_var("MARKETPLACE_TEST_PORT", "not-a-port");
        assert_eq!(parse_var("MARKETPLACE_TEST_PORT", 8080u16), 8080);

        std::env::set_var("MARKETPLACE_TEST_PORT", " 9000 ");
        assert_eq!(parse_var("MARKETPLACE_TEST_PORT", 8080u16), 9000);
        std::env::remove_var("MARKETPLACE_TEST_PORT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.platform_fee_bps, 500);
        assert_eq!(config.allowed_origins.len(), 2);
        assert!(!config.production);
    }
}
