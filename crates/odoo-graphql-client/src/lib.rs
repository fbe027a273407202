#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Sends operations from the registry to an Odoo GraphQL endpoint.
//!
//! The transport sits behind [`GraphQLExecutor`]; [`HttpExecutor`] is the default one.
//! [`OdooClient`] resolves a name against the registry, delegates to the executor, and for
//! typed operations decodes the payload into its response shape.

mod client;
pub mod errors;
mod executor;
mod http;

pub use client::OdooClient;
pub use errors::{Error, RemoteError};
pub use executor::{GraphQLExecutor, GraphQLRequest};
pub use http::{HttpConfig, HttpExecutor};
