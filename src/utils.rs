// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// True when the value is present and not just whitespace
pub fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Parse a boolean flag coming from the environment
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read and parse a JSON file with proper error context
pub async fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_filled() {
        assert!(is_filled(Some("Ana")));
        assert!(!is_filled(Some("  \t")));
        assert!(!is_filled(Some("")));
        assert!(!is_filled(None));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3001/", "/api/users/1/curriculo"),
            "http://localhost:3001/api/users/1/curriculo"
        );
        assert_eq!(join_url("http://api", "health"), "http://api/health");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[tokio::test]
    async fn test_read_json_file_reports_path() {
        let missing = Path::new("/nonexistent/session.json");
        let err = read_json_file::<serde_json::Value>(missing)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/session.json"));
    }
}
