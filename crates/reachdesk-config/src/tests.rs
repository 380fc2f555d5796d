#[cfg(test)]
mod tests {
    use super::super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.hrm.debounce_ms, 500);
        assert_eq!(config.session.currency, "USD");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [api]
            base_url = "https://api.reachdesk.io/v1"

            [hrm]
            debounce_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.reachdesk.io/v1");
        assert_eq!(config.api.token_env, "REACHDESK_API_TOKEN");
        assert_eq!(config.hrm.debounce_ms, 250);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = Config::from_toml_str("[api]\nbase_url = \"ftp://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_rejects_bad_currency() {
        let err = Config::from_toml_str("[session]\ncurrency = \"DOLLARS\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "session:\n  currency: EUR\nlogging:\n  filter: debug").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.session.currency, "EUR");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from("/nonexistent/reachdesk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
