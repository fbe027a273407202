//! Runtime utilities
//!
//! Configuration and logging shared by the command line tools.

mod config;
pub mod logging;
mod parsers;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

/// Prefix of the environment variables that override config values
const ENV_PREFIX: &str = "ODOO_GRAPHQL_";

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment.
/// Environment values take priority over the file.
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file_exact(yaml_path.as_ref()))
        .extract()
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use secrecy::ExposeSecret;
    use tracing::Level;

    use super::{read_config, read_config_from_env};
    use crate::logging::FormatStyle;

    #[test]
    fn reads_a_yaml_file() {
        let config = r#"
            endpoint: https://shop.example.com/graphql/vsf
            headers:
              x-storefront: web
            api_key: from-file
            timeout: 5s
            logging:
              level: debug
              format: json
        "#;

        figment::Jail::expect_with(move |jail| {
            jail.create_file("config.yaml", config)?;

            let config = read_config("config.yaml")?;

            assert_eq!(
                config.endpoint.as_str(),
                "https://shop.example.com/graphql/vsf"
            );
            assert_eq!(config.headers.get("x-storefront").unwrap(), "web");
            assert_eq!(config.api_key.unwrap().expose_secret(), "from-file");
            assert_eq!(config.timeout, Duration::from_secs(5));
            assert_eq!(config.logging.level, Level::DEBUG);
            assert_eq!(config.logging.format, FormatStyle::Json);
            Ok(())
        });
    }

    #[test]
    fn it_prioritizes_env_vars() {
        let config = r#"
            endpoint: http://from_file:8069/graphql/vsf
        "#;

        figment::Jail::expect_with(move |jail| {
            let endpoint = "https://from_env:8069/graphql/vsf";

            jail.create_file("config.yaml", config)?;
            jail.set_env("ODOO_GRAPHQL_ENDPOINT", endpoint);

            let config = read_config("config.yaml")?;

            assert_eq!(config.endpoint.as_str(), endpoint);
            Ok(())
        });
    }

    #[test]
    fn it_extracts_nested_env() {
        let config = r#"
            endpoint: http://localhost:8069/graphql/vsf
            logging:
                level: info
        "#;

        figment::Jail::expect_with(move |jail| {
            jail.create_file("config.yaml", config)?;
            jail.set_env("ODOO_GRAPHQL_LOGGING__FORMAT", "compact");

            let config = read_config("config.yaml")?;

            assert_eq!(config.logging.format, FormatStyle::Compact);
            assert_eq!(config.logging.level, Level::INFO);
            Ok(())
        });
    }

    #[test]
    fn reads_from_env_only_with_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ODOO_GRAPHQL_ENDPOINT", "http://localhost:8069/graphql/vsf");

            let config = read_config_from_env()?;

            assert_eq!(config.timeout, Duration::from_secs(30));
            assert!(config.headers.is_empty());
            assert!(config.api_key.is_none());
            assert_eq!(config.logging.level, Level::INFO);

            let http = config.http_config();
            assert_eq!(http.endpoint.as_str(), "http://localhost:8069/graphql/vsf");
            Ok(())
        });
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "timeout: 10s")?;

            assert!(read_config("config.yaml").is_err());
            Ok(())
        });
    }
}
