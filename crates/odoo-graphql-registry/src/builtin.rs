//! The storefront's own operations
//!
//! Each operation lives in its own file under `graphql/queries` or `graphql/mutations`, named
//! after the operation in snake case. Adding an operation means adding a variant to
//! [`QueryName`] or [`MutationName`], a file, and a line to the matching table below.

use std::sync::LazyLock;

use crate::document::OperationDocument;
use crate::error::RegistryError;
use crate::name::{MutationName, QueryName};
use crate::registry::{OperationRegistry, RegistryBuilder};

macro_rules! operation_file {
    ($dir:literal, $file:literal) => {
        (
            concat!("graphql/", $dir, "/", $file),
            include_str!(concat!("../graphql/", $dir, "/", $file)),
        )
    };
}

type Source = (&'static str, &'static str);

const QUERIES: &[(QueryName, Source)] = &[
    (QueryName::LoadCartQuery, operation_file!("queries", "load_cart.graphql")),
    (QueryName::LoadUserQuery, operation_file!("queries", "load_user.graphql")),
    (
        QueryName::GetProductTemplatesListQuery,
        operation_file!("queries", "get_product_templates_list.graphql"),
    ),
    (
        QueryName::GetProductTemplateQuery,
        operation_file!("queries", "get_product_template.graphql"),
    ),
    (QueryName::GetCategoriesQuery, operation_file!("queries", "get_categories.graphql")),
    (QueryName::GetCountriesQuery, operation_file!("queries", "get_countries.graphql")),
    (QueryName::GetWishlistQuery, operation_file!("queries", "get_wishlist.graphql")),
];

const MUTATIONS: &[(MutationName, Source)] = &[
    (MutationName::CartAddItem, operation_file!("mutations", "cart_add_item.graphql")),
    (MutationName::CartUpdateItem, operation_file!("mutations", "cart_update_item.graphql")),
    (MutationName::CartRemoveItem, operation_file!("mutations", "cart_remove_item.graphql")),
    (MutationName::ApplyCoupon, operation_file!("mutations", "apply_coupon.graphql")),
    (MutationName::Login, operation_file!("mutations", "login.graphql")),
    (MutationName::Logout, operation_file!("mutations", "logout.graphql")),
    (MutationName::Register, operation_file!("mutations", "register.graphql")),
    (MutationName::WishlistAddItem, operation_file!("mutations", "wishlist_add_item.graphql")),
    (
        MutationName::WishlistRemoveItem,
        operation_file!("mutations", "wishlist_remove_item.graphql"),
    ),
];

static REGISTRY: LazyLock<Result<OperationRegistry, RegistryError>> =
    LazyLock::new(OperationRegistry::builtin);

impl OperationRegistry {
    /// Build a fresh registry from the operation files shipped with this crate
    #[tracing::instrument(level = "debug")]
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder::new();
        for (name, (path, source_text)) in QUERIES {
            builder.register_query(*name, *source_text, Some(path.to_string()))?;
        }
        for (name, (path, source_text)) in MUTATIONS {
            builder.register_mutation(*name, *source_text, Some(path.to_string()))?;
        }
        builder.build().inspect_err(|e| {
            tracing::error!("Operation registry is out of sync with its operation names: {e}");
        })
    }
}

/// The process-wide registry, built on first use
pub fn registry() -> Result<&'static OperationRegistry, RegistryError> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

pub fn resolve_query(name: QueryName) -> Result<&'static OperationDocument, RegistryError> {
    registry()?.resolve_query(name)
}

pub fn resolve_mutation(name: MutationName) -> Result<&'static OperationDocument, RegistryError> {
    registry()?.resolve_mutation(name)
}
