use std::future::Future;

use graphql_client::Response;
use odoo_graphql_registry::OperationDocument;
use serde::Serialize;
use serde_json::Value;

use crate::errors::RemoteError;

/// Something that can send a resolved document to a GraphQL server
pub trait GraphQLExecutor: Send + Sync {
    fn run_query(
        &self,
        document: &OperationDocument,
        variables: Option<Value>,
    ) -> impl Future<Output = Result<Response<Value>, RemoteError>> + Send;

    fn run_mutation(
        &self,
        document: &OperationDocument,
        variables: Value,
    ) -> impl Future<Output = Result<Response<Value>, RemoteError>> + Send;
}

/// The JSON body of a GraphQL request over HTTP
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
    pub operation_name: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variables: Value,
}

impl<'a> GraphQLRequest<'a> {
    pub fn new(document: &'a OperationDocument, variables: Option<Value>) -> Self {
        Self {
            query: document.source_text(),
            operation_name: document.operation_name(),
            variables: variables.unwrap_or(Value::Null),
        }
    }
}
