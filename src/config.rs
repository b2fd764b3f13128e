// src/config.rs

use std::env;
use std::net::SocketAddr;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    /// Directory for the daily rolling log file.
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    /// Placeholder author stamped on comments submitted from the composer.
    pub comment_author: String,
    /// When set, the composer refuses empty comments instead of appending them.
    pub reject_empty_comments: bool,
    /// Exclusive upper bound of the mock upvote seed.
    pub upvote_seed_max: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            comment_author: "Random User".to_string(),
            reject_empty_comments: false,
            upvote_seed_max: 100,
        }
    }
}

impl Config {
    /// Reads the process environment (after `.env`).
    ///
    /// Also returns a note for every variable that was set but malformed and
    /// replaced by its default. Logging is not up yet at this point, so the
    /// caller reports them once the subscriber is installed.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let defaults = Self::default();
        let mut ignored = Vec::new();

        let bind_addr = parsed_var(&lookup, "BIND_ADDR", &mut ignored)
            .unwrap_or(defaults.bind_addr);

        let rust_log = lookup("RUST_LOG")
            .unwrap_or(defaults.rust_log);

        let log_dir = lookup("LOG_DIR")
            .unwrap_or(defaults.log_dir);

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let comment_author = lookup("COMMENT_AUTHOR")
            .filter(|author| !author.trim().is_empty())
            .unwrap_or(defaults.comment_author);

        let reject_empty_comments = parsed_var(&lookup, "COMMENTS_REJECT_EMPTY", &mut ignored)
            .unwrap_or(defaults.reject_empty_comments);

        // Zero would leave the seed range empty.
        let upvote_seed_max = match parsed_var(&lookup, "UPVOTE_SEED_MAX", &mut ignored) {
            Some(0) => {
                ignored.push("UPVOTE_SEED_MAX=\"0\" (must be positive)".to_string());
                defaults.upvote_seed_max
            }
            Some(max) => max,
            None => defaults.upvote_seed_max,
        };

        let config = Self {
            bind_addr,
            rust_log,
            log_dir,
            cors_origins,
            comment_author,
            reject_empty_comments,
            upvote_seed_max,
        };
        (config, ignored)
    }
}

/// Reads and parses one variable. Malformed values are recorded in `ignored`.
fn parsed_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    ignored: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            ignored.push(format!("{}={:?}", key, raw));
            None
        }
    }
}
