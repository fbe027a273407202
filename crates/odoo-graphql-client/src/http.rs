use std::time::Duration;

use graphql_client::Response;
use odoo_graphql_registry::OperationDocument;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{Error, RemoteError};
use crate::executor::{GraphQLExecutor, GraphQLRequest};

const API_KEY_HEADER: &str = "api-key";

/// Settings for talking to the Odoo GraphQL endpoint
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// The Odoo GraphQL endpoint, e.g. `https://shop.example.com/graphql/vsf`
    pub endpoint: Url,

    /// Headers sent with every request
    pub headers: HeaderMap,

    /// Key sent in the `api-key` header
    pub api_key: Option<SecretString>,

    /// Timeout for each request
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            headers: HeaderMap::new(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Sends operations as JSON over HTTP POST.
///
/// Cookies set by the server are kept between requests, so a cart or login bound to the Odoo
/// session survives from one operation to the next.
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpExecutor {
    pub fn new(config: HttpConfig) -> Result<Self, Error> {
        let mut headers = config.headers;
        if let Some(api_key) = config.api_key.as_ref() {
            let mut value = HeaderValue::from_str(api_key.expose_secret())?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[tracing::instrument(
        skip_all,
        fields(operation = %document.name(), kind = %document.kind(), endpoint = %self.endpoint)
    )]
    async fn send(
        &self,
        document: &OperationDocument,
        variables: Option<Value>,
    ) -> Result<Response<Value>, RemoteError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQLRequest::new(document, variables))
            .send()
            .await
            .map_err(RemoteError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
            warn!(%status, "GraphQL endpoint returned an error status");
            return Err(RemoteError::Status { status, body });
        }

        let body = response
            .json::<Response<Value>>()
            .await
            .map_err(RemoteError::Request)?;

        match body.errors.as_deref() {
            Some(errors) if !errors.is_empty() => {
                debug!(count = errors.len(), "GraphQL response contains errors");
            }
            _ => debug!("GraphQL response received"),
        }

        Ok(body)
    }
}

impl GraphQLExecutor for HttpExecutor {
    async fn run_query(
        &self,
        document: &OperationDocument,
        variables: Option<Value>,
    ) -> Result<Response<Value>, RemoteError> {
        self.send(document, variables).await
    }

    async fn run_mutation(
        &self,
        document: &OperationDocument,
        variables: Value,
    ) -> Result<Response<Value>, RemoteError> {
        self.send(document, Some(variables)).await
    }
}
