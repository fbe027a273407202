use std::collections::HashMap;
use std::time::Duration;

use odoo_graphql_client::HttpConfig;
use reqwest::header::HeaderMap;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::logging::Logging;
use crate::parsers;

/// Configuration for talking to an Odoo GraphQL endpoint
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Config {
    /// The Odoo GraphQL endpoint
    pub endpoint: Url,

    /// Headers to include in all GraphQL requests
    #[serde(default, deserialize_with = "parsers::header_map")]
    #[schemars(schema_with = "header_map")]
    pub headers: HeaderMap,

    /// Key sent in the `api-key` header
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub api_key: Option<SecretString>,

    /// Timeout for each request, e.g. `30s`
    #[serde(default = "defaults::timeout", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,

    /// Logging options
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            endpoint: self.endpoint.clone(),
            headers: self.headers.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

mod defaults {
    use std::time::Duration;

    pub(super) const fn timeout() -> Duration {
        Duration::from_secs(30)
    }
}

fn header_map(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    HashMap::<String, String>::json_schema(generator)
}
