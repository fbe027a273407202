use std::fmt;

use apollo_compiler::validation::WithErrors;

use crate::name::{OperationKind, OperationName};

/// A misconfigured registry.
///
/// These are programmer errors: the table of documents and the enumerations of names have
/// drifted apart, or a document does not describe the operation it is registered under. None
/// of them are recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{kind} `{name}` has no registered document")]
    Unregistered { kind: OperationKind, name: OperationName },

    #[error("{kind} `{name}` is registered more than once")]
    DuplicateName { kind: OperationKind, name: OperationName },

    #[error("`{first}` and `{second}` both declare the GraphQL operation `{operation_name}`")]
    DuplicateOperationName {
        operation_name: String,
        first: OperationName,
        second: OperationName,
    },

    #[error("could not parse the document of `{name}`: {diagnostics}")]
    Parse {
        name: OperationName,
        diagnostics: String,
    },

    #[error("{}no operations defined for `{name}`", source_prefix(.source_path))]
    NoOperations {
        name: OperationName,
        source_path: Option<String>,
    },

    #[error(
        "{}too many operations for `{name}`. Expected 1 but got {count}",
        source_prefix(.source_path)
    )]
    TooManyOperations {
        name: OperationName,
        source_path: Option<String>,
        count: usize,
    },

    #[error("{}the operation registered as `{name}` is missing its name", source_prefix(.source_path))]
    MissingOperationName {
        name: OperationName,
        source_path: Option<String>,
    },

    #[error("`{name}` is registered as a {expected} but its document declares a {found}")]
    KindMismatch {
        name: OperationName,
        expected: OperationKind,
        found: String,
    },

    #[error("unknown operation name `{0}`")]
    UnknownName(String),

    #[error("operation name `{0}` is both a query and a mutation")]
    AmbiguousName(String),
}

fn source_prefix(source_path: &Option<String>) -> String {
    source_path
        .as_ref()
        .map(|s| format!("{s}: "))
        .unwrap_or_default()
}

/// Formats parser diagnostics one per line, without going through ariadne's report
/// rendering which can split multibyte characters.
pub(crate) struct Diagnostics<'a, T>(pub(crate) &'a WithErrors<T>);

impl<T> fmt::Display for Diagnostics<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = &self.0.errors;

        if errors.is_empty() {
            return write!(f, "Unknown error");
        }

        for (i, diagnostic) in errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}. {}", i + 1, diagnostic.error)?;
        }

        Ok(())
    }
}
