use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::document::OperationDocument;
use crate::error::RegistryError;
use crate::name::{MutationName, OperationName, QueryName};

/// Collects operation documents before the registry is frozen.
///
/// Registration order does not matter. Any misconfiguration is reported on the registration
/// that causes it, or by [`RegistryBuilder::build`] for names that were never registered.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    documents: HashMap<OperationName, OperationDocument>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_query(
        &mut self,
        name: QueryName,
        source_text: impl Into<String>,
        source_path: Option<String>,
    ) -> Result<&mut Self, RegistryError> {
        self.register(OperationName::Query(name), source_text, source_path)
    }

    pub fn register_mutation(
        &mut self,
        name: MutationName,
        source_text: impl Into<String>,
        source_path: Option<String>,
    ) -> Result<&mut Self, RegistryError> {
        self.register(OperationName::Mutation(name), source_text, source_path)
    }

    pub fn register(
        &mut self,
        name: OperationName,
        source_text: impl Into<String>,
        source_path: Option<String>,
    ) -> Result<&mut Self, RegistryError> {
        let document = OperationDocument::parse(name, source_text, source_path)?;

        if let Some(other) = self
            .documents
            .values()
            .find(|other| other.operation_name() == document.operation_name())
            .filter(|other| other.name() != name)
        {
            return Err(RegistryError::DuplicateOperationName {
                operation_name: document.operation_name().to_string(),
                first: other.name(),
                second: name,
            });
        }

        match self.documents.entry(name) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateName {
                kind: name.kind(),
                name,
            }),
            Entry::Vacant(entry) => {
                debug!(
                    %name,
                    operation_name = document.operation_name(),
                    source_path = document.source_path(),
                    "Registered {}",
                    name.kind()
                );
                entry.insert(document);
                Ok(self)
            }
        }
    }

    /// Freeze the registry. Fails if any name of either enumeration has no document.
    pub fn build(self) -> Result<OperationRegistry, RegistryError> {
        if let Some(name) = OperationName::all().find(|name| !self.documents.contains_key(name)) {
            return Err(RegistryError::Unregistered {
                kind: name.kind(),
                name,
            });
        }
        Ok(self.build_partial())
    }

    /// Freeze the registry without checking that every name has a document.
    pub fn build_partial(self) -> OperationRegistry {
        OperationRegistry {
            documents: self.documents,
        }
    }
}

/// Read-only table of every operation the storefront can send.
///
/// Once built, the registry is never mutated, so it can be shared across threads and read
/// without locking.
#[derive(Debug)]
pub struct OperationRegistry {
    documents: HashMap<OperationName, OperationDocument>,
}

impl OperationRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve(&self, name: OperationName) -> Result<&OperationDocument, RegistryError> {
        self.documents
            .get(&name)
            .ok_or(RegistryError::Unregistered {
                kind: name.kind(),
                name,
            })
    }

    pub fn resolve_query(&self, name: QueryName) -> Result<&OperationDocument, RegistryError> {
        self.resolve(OperationName::Query(name))
    }

    pub fn resolve_mutation(
        &self,
        name: MutationName,
    ) -> Result<&OperationDocument, RegistryError> {
        self.resolve(OperationName::Mutation(name))
    }

    /// Documents sorted by name, queries first
    pub fn documents(&self) -> Vec<&OperationDocument> {
        let mut documents: Vec<&OperationDocument> = self.documents.values().collect();
        documents.sort_by_key(|document| document.name());
        documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::OperationKind;

    const LOAD_CART: &str = "query LoadCart { cart { order { id name } } }";
    const LOAD_USER: &str = "query LoadUser { partner { id } }";

    #[test]
    fn resolves_registered_documents() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap()
            .register_query(QueryName::LoadUserQuery, LOAD_USER, None)
            .unwrap();
        let registry = builder.build_partial();

        let document = registry.resolve_query(QueryName::LoadCartQuery).unwrap();
        assert_eq!(document.source_text(), LOAD_CART);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registration_order_does_not_matter() {
        const REMOVE_ITEMS: &str = "mutation CartRemoveItem($lineIds: [Int]!) { cartRemoveMultipleItems(lineIds: $lineIds) { order { id } } }";
        let entries = [
            (OperationName::Query(QueryName::LoadCartQuery), LOAD_CART),
            (OperationName::Query(QueryName::LoadUserQuery), LOAD_USER),
            (
                OperationName::Mutation(MutationName::CartRemoveItem),
                REMOVE_ITEMS,
            ),
        ];

        let build = |order: &[(OperationName, &str)]| {
            let mut builder = RegistryBuilder::new();
            for (name, source_text) in order {
                builder.register(*name, *source_text, None).unwrap();
            }
            builder.build_partial()
        };
        let forward = build(&entries);
        let reversed = build(&entries.iter().rev().copied().collect::<Vec<_>>());

        let listing = |registry: &OperationRegistry| {
            registry
                .documents()
                .iter()
                .map(|document| (document.name(), document.source_text().to_string()))
                .collect::<Vec<_>>()
        };
        assert_eq!(listing(&forward), listing(&reversed));

        for (name, source_text) in entries {
            assert_eq!(forward.resolve(name).unwrap().source_text(), source_text);
            assert_eq!(reversed.resolve(name).unwrap().source_text(), source_text);
        }
        assert_eq!(
            forward
                .resolve_mutation(MutationName::CartRemoveItem)
                .unwrap()
                .operation_name(),
            reversed
                .resolve_mutation(MutationName::CartRemoveItem)
                .unwrap()
                .operation_name()
        );
    }

    #[test]
    fn repeated_resolution_returns_the_same_instance() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap();
        let registry = builder.build_partial();

        let first = registry.resolve_query(QueryName::LoadCartQuery).unwrap();
        let second = registry.resolve_query(QueryName::LoadCartQuery).unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap();

        let err = builder
            .register_query(
                QueryName::LoadCartQuery,
                "query LoadCart { cart { order { id } } }",
                None,
            )
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateName {
                kind: OperationKind::Query,
                name: OperationName::Query(QueryName::LoadCartQuery),
            }
        );
        // The first registration is kept
        let registry = builder.build_partial();
        assert_eq!(
            registry
                .resolve_query(QueryName::LoadCartQuery)
                .unwrap()
                .source_text(),
            LOAD_CART
        );
    }

    #[test]
    fn duplicate_operation_name_across_categories_is_rejected() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadUserQuery, "query Login { partner { id } }", None)
            .unwrap();

        let err = builder
            .register_mutation(
                MutationName::Login,
                "mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) { id } }",
                None,
            )
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateOperationName {
                operation_name: "Login".to_string(),
                first: OperationName::Query(QueryName::LoadUserQuery),
                second: OperationName::Mutation(MutationName::Login),
            }
        );
    }

    #[test]
    fn unregistered_name_fails_loudly() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap();
        let registry = builder.build_partial();

        let err = registry
            .resolve_mutation(MutationName::CartRemoveItem)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Unregistered {
                kind: OperationKind::Mutation,
                name: OperationName::Mutation(MutationName::CartRemoveItem),
            }
        );
    }

    #[test]
    fn build_requires_every_name() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::Unregistered {
                kind: OperationKind::Query,
                name: OperationName::Query(QueryName::LoadUserQuery),
            }
        );
    }

    #[test]
    #[tracing_test::traced_test]
    fn registration_is_logged() {
        let mut builder = RegistryBuilder::new();
        builder
            .register_query(QueryName::LoadCartQuery, LOAD_CART, None)
            .unwrap();

        assert!(logs_contain("Registered query"));
        assert!(logs_contain("LoadCart"));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OperationRegistry>();
    }
}
