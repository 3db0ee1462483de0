//! Configuration validation.
//!
//! Every key is optional; when present it must be well formed. Runs before
//! any command reads settings so bad values fail early with the section
//! and key named.

use crate::domain::error::MockstreetError;
use crate::ports::config_port::ConfigPort;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), MockstreetError> {
    validate_data_source(config)?;
    validate_chart(config)?;
    validate_page_size(config)?;
    validate_balance(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> MockstreetError {
    MockstreetError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Parse a present key as f64, distinguishing "absent" from "garbage".
fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, MockstreetError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("expected a number, got '{raw}'"))),
    }
}

fn parse_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, MockstreetError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("expected an integer, got '{raw}'"))),
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), MockstreetError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "mock".to_string());
    match source.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(()),
        "csv" => match config.get_string("data", "dir") {
            Some(dir) if !dir.trim().is_empty() => Ok(()),
            _ => Err(MockstreetError::ConfigMissing {
                section: "data".to_string(),
                key: "dir".to_string(),
            }),
        },
        other => Err(invalid(
            "data",
            "source",
            format!("unknown source '{other}', expected mock or csv"),
        )),
    }
}

fn validate_chart(config: &dyn ConfigPort) -> Result<(), MockstreetError> {
    if let Some(days) = parse_int(config, "chart", "days")? {
        if !(0..=crate::domain::series::MAX_SERIES_DAYS as i64).contains(&days) {
            return Err(invalid(
                "chart",
                "days",
                format!(
                    "days must be between 0 and {}",
                    crate::domain::series::MAX_SERIES_DAYS
                ),
            ));
        }
    }
    if let Some(v) = parse_double(config, "chart", "volatility")? {
        if !(0.0..1.0).contains(&v) {
            return Err(invalid("chart", "volatility", "volatility must be in [0, 1)"));
        }
    }
    if let Some(t) = parse_double(config, "chart", "trend_strength")? {
        if !(0.0..=1.0).contains(&t) {
            return Err(invalid(
                "chart",
                "trend_strength",
                "trend_strength must be in [0, 1]",
            ));
        }
    }
    if let Some(raw) = config.get_string("chart", "seed") {
        if raw.trim().parse::<u64>().is_err() {
            return Err(invalid(
                "chart",
                "seed",
                "seed must be a non-negative integer",
            ));
        }
    }
    Ok(())
}

fn validate_page_size(config: &dyn ConfigPort) -> Result<(), MockstreetError> {
    if let Some(size) = parse_int(config, "table", "page_size")? {
        if size <= 0 {
            return Err(invalid("table", "page_size", "page_size must be positive"));
        }
    }
    Ok(())
}

fn validate_balance(config: &dyn ConfigPort) -> Result<(), MockstreetError> {
    if let Some(balance) = parse_double(config, "account", "balance")? {
        if !balance.is_finite() || balance < 0.0 {
            return Err(invalid(
                "account",
                "balance",
                "balance must be non-negative",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    fn assert_invalid(config: MapConfig, section: &str, key: &str) {
        match validate_app_config(&config) {
            Err(MockstreetError::ConfigInvalid {
                section: s, key: k, ..
            }) => {
                assert_eq!(s, section);
                assert_eq!(k, key);
            }
            other => panic!("expected ConfigInvalid for [{section}] {key}, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(validate_app_config(&MapConfig::new(&[])).is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let config = MapConfig::new(&[
            ("data", "source", "csv"),
            ("data", "dir", "/tmp/data"),
            ("chart", "days", "60"),
            ("chart", "volatility", "0.03"),
            ("chart", "trend_strength", "0.2"),
            ("chart", "seed", "42"),
            ("table", "page_size", "25"),
            ("account", "balance", "5000"),
        ]);
        assert!(validate_app_config(&config).is_ok());
    }

    #[test]
    fn csv_source_needs_dir() {
        let config = MapConfig::new(&[("data", "source", "csv")]);
        assert!(matches!(
            validate_app_config(&config),
            Err(MockstreetError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn unknown_source_is_invalid() {
        assert_invalid(MapConfig::new(&[("data", "source", "postgres")]), "data", "source");
    }

    #[test]
    fn zero_page_size_is_invalid() {
        assert_invalid(MapConfig::new(&[("table", "page_size", "0")]), "table", "page_size");
    }

    #[test]
    fn non_numeric_page_size_is_invalid() {
        assert_invalid(MapConfig::new(&[("table", "page_size", "ten")]), "table", "page_size");
    }

    #[test]
    fn volatility_out_of_range() {
        assert_invalid(MapConfig::new(&[("chart", "volatility", "1.5")]), "chart", "volatility");
        assert_invalid(MapConfig::new(&[("chart", "volatility", "-0.1")]), "chart", "volatility");
    }

    #[test]
    fn negative_days_is_invalid() {
        assert_invalid(MapConfig::new(&[("chart", "days", "-1")]), "chart", "days");
    }

    #[test]
    fn bad_seed_is_invalid() {
        assert_invalid(MapConfig::new(&[("chart", "seed", "abc")]), "chart", "seed");
    }

    #[test]
    fn negative_balance_is_invalid() {
        assert_invalid(MapConfig::new(&[("account", "balance", "-1")]), "account", "balance");
    }
}
