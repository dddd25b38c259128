use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    // Logging
    pub log_dir: String,
    pub log_level: Level,

    /// Requests per minute per peer IP; 0 turns the limiter off
    pub rate_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://attendance.db".to_string()),
            db_max_connections: parse_var(env::var("DB_MAX_CONNECTIONS").ok(), 5),

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_var(env::var("LOG_LEVEL").ok(), Level::DEBUG),

            rate_per_min: parse_var(env::var("RATE_PER_MIN").ok(), 600),
        }
    }
}

/// Parses a raw env value, falling back to `default` when unset or garbage.
fn parse_var<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            log_dir: "logs".to_string(),
            log_level: Level::DEBUG,
            rate_per_min: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_values_fall_back_to_default() {
        assert_eq!(parse_var(Some("lots".to_string()), 42u32), 42);
        assert_eq!(parse_var(Some(" 7 ".to_string()), 42u32), 7);
        assert_eq!(parse_var(None, 42u32), 42);
    }

    #[test]
    fn log_level_parses_from_name() {
        assert_eq!(parse_var(None, Level::INFO), Level::INFO);
        assert_eq!(parse_var(Some("warn".to_string()), Level::INFO), Level::WARN);
        assert_eq!(parse_var(Some("loud".to_string()), Level::INFO), Level::INFO);
    }
}
