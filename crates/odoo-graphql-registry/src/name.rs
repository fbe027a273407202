//! Symbolic operation names
//!
//! Every operation the storefront sends has a symbolic name drawn from one of two closed
//! enumerations. Call sites only ever name operations through these types, so the set of
//! operations that can be requested is known at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::RegistryError;

/// Whether an operation reads or changes server-side state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

/// Queries sent to the Odoo backend
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum QueryName {
    LoadCartQuery,
    LoadUserQuery,
    GetProductTemplatesListQuery,
    GetProductTemplateQuery,
    GetCategoriesQuery,
    GetCountriesQuery,
    GetWishlistQuery,
}

/// Mutations sent to the Odoo backend
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum MutationName {
    CartAddItem,
    CartUpdateItem,
    CartRemoveItem,
    ApplyCoupon,
    Login,
    Logout,
    Register,
    WishlistAddItem,
    WishlistRemoveItem,
}

/// Key of the registry table. Queries and mutations live in the same table but can never
/// collide since the category is part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum OperationName {
    Query(QueryName),
    Mutation(MutationName),
}

impl OperationName {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationName::Query(_) => OperationKind::Query,
            OperationName::Mutation(_) => OperationKind::Mutation,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationName::Query(name) => name.into(),
            OperationName::Mutation(name) => name.into(),
        }
    }

    /// Every name of both enumerations, queries first
    pub fn all() -> impl Iterator<Item = OperationName> {
        QueryName::iter()
            .map(OperationName::Query)
            .chain(MutationName::iter().map(OperationName::Mutation))
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<QueryName> for OperationName {
    fn from(name: QueryName) -> Self {
        OperationName::Query(name)
    }
}

impl From<MutationName> for OperationName {
    fn from(name: MutationName) -> Self {
        OperationName::Mutation(name)
    }
}

impl FromStr for OperationName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match (QueryName::from_str(s), MutationName::from_str(s)) {
            (Ok(query), Err(_)) => Ok(OperationName::Query(query)),
            (Err(_), Ok(mutation)) => Ok(OperationName::Mutation(mutation)),
            (Ok(_), Ok(_)) => Err(RegistryError::AmbiguousName(s.to_string())),
            (Err(_), Err(_)) => Err(RegistryError::UnknownName(s.to_string())),
        }
    }
}
