use odoo_graphql_registry::RegistryError;
use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;

/// A failure reported by the GraphQL server or on the way to it.
///
/// These are forwarded to the caller as they were received.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error(transparent)]
    Request(reqwest::Error),

    #[error("GraphQL endpoint responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("GraphQL errors: {}", messages(.0))]
    GraphQL(Vec<graphql_client::Error>),

    #[error("response to `{0}` has no data")]
    MissingData(String),

    #[error("could not decode the response data: {0}")]
    Decode(serde_json::Error),
}

fn messages(errors: &[graphql_client::Error]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Any error a call site can get back from [`crate::OdooClient`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The registry is out of sync with the operation names
    #[error("operation registry misconfigured: {0}")]
    Configuration(#[from] RegistryError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("invalid variables: {0}")]
    Variables(serde_json::Error),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),

    #[error("could not create the HTTP client: {0}")]
    HttpClient(reqwest::Error),
}
