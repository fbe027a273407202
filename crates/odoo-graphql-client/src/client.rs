use graphql_client::Response;
use odoo_graphql_registry::{
    MutationName, OperationKind, OperationName, OperationRegistry, QueryName, TypedOperation,
    registry,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Error, RemoteError};
use crate::executor::GraphQLExecutor;
use crate::http::{HttpConfig, HttpExecutor};

/// Resolves operations by name and hands them to an executor
pub struct OdooClient<'r, E = HttpExecutor> {
    registry: &'r OperationRegistry,
    executor: E,
}

impl OdooClient<'static, HttpExecutor> {
    /// A client for the builtin operations over HTTP
    pub fn connect(config: HttpConfig) -> Result<Self, Error> {
        Self::new(HttpExecutor::new(config)?)
    }
}

impl<E: GraphQLExecutor> OdooClient<'static, E> {
    /// A client for the builtin operations
    pub fn new(executor: E) -> Result<Self, Error> {
        Ok(Self {
            registry: registry()?,
            executor,
        })
    }
}

impl<'r, E: GraphQLExecutor> OdooClient<'r, E> {
    pub fn with_registry(registry: &'r OperationRegistry, executor: E) -> Self {
        Self { registry, executor }
    }

    pub fn registry(&self) -> &'r OperationRegistry {
        self.registry
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run a query and return the raw GraphQL response, errors included
    #[tracing::instrument(skip(self, variables))]
    pub async fn query(
        &self,
        name: QueryName,
        variables: Option<Value>,
    ) -> Result<Response<Value>, Error> {
        let document = self.registry.resolve_query(name)?;
        Ok(self.executor.run_query(document, variables).await?)
    }

    /// Run a mutation and return the raw GraphQL response, errors included
    #[tracing::instrument(skip(self, variables))]
    pub async fn mutate(
        &self,
        name: MutationName,
        variables: Value,
    ) -> Result<Response<Value>, Error> {
        let document = self.registry.resolve_mutation(name)?;
        Ok(self.executor.run_mutation(document, variables).await?)
    }

    /// Run a query or mutation by name
    pub async fn run(
        &self,
        name: OperationName,
        variables: Option<Value>,
    ) -> Result<Response<Value>, Error> {
        match name {
            OperationName::Query(name) => self.query(name, variables).await,
            OperationName::Mutation(name) => {
                self.mutate(name, variables.unwrap_or_else(|| Value::Object(Default::default())))
                    .await
            }
        }
    }

    /// Run a typed operation and decode its payload.
    ///
    /// GraphQL errors in the response are returned as [`RemoteError::GraphQL`], unchanged.
    #[tracing::instrument(skip_all, fields(operation = %O::NAME))]
    pub async fn execute<O: TypedOperation>(
        &self,
        variables: &O::Variables,
    ) -> Result<O::ResponseData, Error> {
        let variables = serde_json::to_value(variables).map_err(Error::Variables)?;
        let document = self.registry.resolve(O::NAME)?;
        let response = match document.kind() {
            OperationKind::Query => self.executor.run_query(document, Some(variables)).await?,
            OperationKind::Mutation => self.executor.run_mutation(document, variables).await?,
        };
        Ok(response_data(O::NAME, response)?)
    }
}

fn response_data<T: DeserializeOwned>(
    name: OperationName,
    response: Response<Value>,
) -> Result<T, RemoteError> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(RemoteError::GraphQL(errors));
    }
    let data = response
        .data
        .filter(|data| !data.is_null())
        .ok_or_else(|| RemoteError::MissingData(name.to_string()))?;
    serde_json::from_value(data).map_err(RemoteError::Decode)
}
