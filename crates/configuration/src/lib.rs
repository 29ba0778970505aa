use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Analysis, Company, Config, Data, RateSource, Server};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `RATESENSE_*` environment overrides on top,
/// deserializes everything into our strongly-typed `Config` struct, and
/// validates the catalogs before returning.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("RATESENSE").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.companies.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one company must be configured".to_string(),
        ));
    }

    if config.rate_sources.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one rate source must be configured".to_string(),
        ));
    }

    for (i, source) in config.rate_sources.iter().enumerate() {
        if config.rate_sources[..i].iter().any(|s| s.id == source.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate rate source id '{}'",
                source.id
            )));
        }
    }

    for (i, company) in config.companies.iter().enumerate() {
        if config.companies[..i].iter().any(|c| c.id == company.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate company id '{}'",
                company.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        let config = builder.try_deserialize::<Config>()?;
        validate(&config)?;
        Ok(config)
    }

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [data]
        dir = "data"

        [analysis]

        [[companies]]
        id = "samsung"
        name = "Samsung Life"

        [[rate_sources]]
        id = "us10y"
        label = "US Treasury 10Y"
    "#;

    #[test]
    fn minimal_config_gets_analysis_defaults() {
        let config = parse(MINIMAL).unwrap();

        assert_eq!(config.analysis.default_lookback_years, 3);
        assert_eq!(config.analysis.rate_change_epsilon, Decimal::new(1, 4));
        assert_eq!(config.analysis.max_abs_duration, Some(Decimal::ONE_HUNDRED));
        assert_eq!(config.analysis.max_rate_staleness_days, 10);
        assert_eq!(config.data.cache_ttl_secs, 6 * 60 * 60);
    }

    #[test]
    fn company_lookup_by_id() {
        let config = parse(MINIMAL).unwrap();

        assert_eq!(config.company("samsung").unwrap().name, "Samsung Life");
        assert!(config.company("unknown").is_none());
    }

    #[test]
    fn duplicate_rate_source_ids_are_rejected() {
        let toml = MINIMAL.to_string()
            + r#"
        [[rate_sources]]
        id = "us10y"
        label = "Duplicate"
        "#;

        assert!(matches!(
            parse(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn empty_company_catalog_is_rejected() {
        let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [data]
        dir = "data"

        [analysis]

        [[rate_sources]]
        id = "us10y"
        label = "US Treasury 10Y"
        "#;

        assert!(parse(toml).is_err());
    }
}
