#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Registry of the GraphQL operations the storefront sends to Odoo.
//!
//! Call sites never build request documents themselves. They name an operation through
//! [`QueryName`] or [`MutationName`] and resolve it to a parsed [`OperationDocument`]:
//!
//! ```
//! use odoo_graphql_registry::{QueryName, resolve_query};
//!
//! let document = resolve_query(QueryName::LoadCartQuery)?;
//! assert_eq!(document.operation_name(), "LoadCart");
//! # Ok::<(), odoo_graphql_registry::RegistryError>(())
//! ```

mod builtin;
mod document;
mod error;
mod name;
mod registry;
pub mod shapes;

pub use builtin::{registry, resolve_mutation, resolve_query};
pub use document::{OperationDocument, VariableSignature};
pub use error::RegistryError;
pub use name::{MutationName, OperationKind, OperationName, QueryName};
pub use registry::{OperationRegistry, RegistryBuilder};
pub use shapes::TypedOperation;
