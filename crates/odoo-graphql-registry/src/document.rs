//! Parsed operation documents

use apollo_compiler::Node;
use apollo_compiler::ast::{self, Definition, OperationDefinition, OperationType, Selection};

use crate::error::{Diagnostics, RegistryError};
use crate::name::{OperationKind, OperationName};

/// A variable declared by an operation, e.g. `$lineIds: [Int]!`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSignature {
    pub name: String,
    pub ty: String,
    pub has_default: bool,
}

/// A GraphQL operation parsed once from its source text.
///
/// Documents are immutable; the registry hands out shared references to the same instance
/// for the whole life of the process.
#[derive(Debug, Clone)]
pub struct OperationDocument {
    name: OperationName,
    source_text: String,
    source_path: Option<String>,
    document: ast::Document,
    operation: Node<OperationDefinition>,
}

impl OperationDocument {
    /// Parse `source_text` as the single operation registered under `name`
    pub fn parse(
        name: OperationName,
        source_text: impl Into<String>,
        source_path: Option<String>,
    ) -> Result<Self, RegistryError> {
        let source_text = source_text.into();
        let path = source_path.as_deref().unwrap_or("operation.graphql");
        let document = ast::Document::parse(source_text.as_str(), path).map_err(|errors| {
            RegistryError::Parse {
                name,
                diagnostics: Diagnostics(&errors).to_string(),
            }
        })?;

        let mut operations = document.definitions.iter().filter_map(|definition| {
            if let Definition::OperationDefinition(operation) = definition {
                Some(operation)
            } else {
                None
            }
        });
        let operation = match (operations.next(), operations.count()) {
            (None, _) => {
                return Err(RegistryError::NoOperations { name, source_path });
            }
            (Some(operation), 0) => operation.clone(),
            (Some(_), rest) => {
                return Err(RegistryError::TooManyOperations {
                    name,
                    source_path,
                    count: rest + 1,
                });
            }
        };

        let expected = match name.kind() {
            OperationKind::Query => OperationType::Query,
            OperationKind::Mutation => OperationType::Mutation,
        };
        if operation.operation_type != expected {
            return Err(RegistryError::KindMismatch {
                name,
                expected: name.kind(),
                found: operation_type_name(operation.operation_type).to_string(),
            });
        }

        if operation.name.is_none() {
            return Err(RegistryError::MissingOperationName { name, source_path });
        }

        Ok(Self {
            name,
            source_text,
            source_path,
            document,
            operation,
        })
    }

    pub fn name(&self) -> OperationName {
        self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.name.kind()
    }

    /// The request string sent as `query` in the GraphQL request body
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// The name declared in the document, sent as `operationName`
    pub fn operation_name(&self) -> &str {
        self.operation
            .name
            .as_ref()
            .map(|name| name.as_str())
            .unwrap_or_default()
    }

    pub fn variables(&self) -> Vec<VariableSignature> {
        self.operation
            .variables
            .iter()
            .map(|variable| VariableSignature {
                name: variable.name.to_string(),
                ty: variable.ty.to_string(),
                has_default: variable.default_value.is_some(),
            })
            .collect()
    }

    /// Names of the fields selected at the root of the operation
    pub fn root_fields(&self) -> Vec<&str> {
        fields(&self.operation.selection_set)
    }

    /// Follows a path of field names from the root and returns the fields selected at its end.
    /// Returns `None` if a segment of the path is not selected.
    pub fn selected_fields(&self, path: &[&str]) -> Option<Vec<&str>> {
        let mut selection_set = &self.operation.selection_set;
        for segment in path {
            selection_set = selection_set.iter().find_map(|selection| match selection {
                Selection::Field(field) if field.name.as_str() == *segment => {
                    Some(&field.selection_set)
                }
                _ => None,
            })?;
        }
        Some(fields(selection_set))
    }

    pub fn ast(&self) -> &ast::Document {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        self.operation.selection_set.is_empty()
    }
}

fn fields(selection_set: &[Selection]) -> Vec<&str> {
    selection_set
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field.name.as_str()),
            _ => None,
        })
        .collect()
}

fn operation_type_name(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}
