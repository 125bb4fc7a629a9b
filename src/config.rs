//! Configuration management for the annotation server

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub annotator: AnnotatorConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Default destination for saved annotation logs
    pub output_path: PathBuf,
    /// Labels every new session starts with
    pub seed_labels: Vec<String>,
    /// Idle minutes before a session is reaped
    pub session_ttl_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            annotator: AnnotatorConfig {
                output_path: PathBuf::from("./annotations.json"),
                seed_labels: vec!["SKU".to_string()],
                session_ttl_minutes: 120,
            },
        }
    }
}

impl Config {
    /// Build a configuration from the environment, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            annotator: AnnotatorConfig {
                output_path: env::var("ANNOTATIONS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./annotations.json")),
                seed_labels: parse_labels(&env::var("DEFAULT_LABELS").unwrap_or_default()),
                session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
            },
        }
    }
}

fn parse_labels(raw: &str) -> Vec<String> {
    let labels: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if labels.is_empty() {
        vec!["SKU".to_string()]
    } else {
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_splits_and_trims() {
        assert_eq!(parse_labels("SKU, PERSON ,ORG"), ["SKU", "PERSON", "ORG"]);
    }

    #[test]
    fn test_parse_labels_falls_back_to_default() {
        assert_eq!(parse_labels(""), ["SKU"]);
        assert_eq!(parse_labels(" , ,"), ["SKU"]);
    }
}
