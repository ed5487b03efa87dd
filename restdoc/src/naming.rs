//! Naming policy: how a described type becomes a document-level identifier.
//!
//! The builders never decide names themselves; every `#/definitions/<name>`
//! target and every primitive lookup goes through a [`NamingPolicy`].

use crate::error::{Error, Result};
use crate::introspect::TypeDescriptor;
use once_cell::sync::Lazy;
use regex::Regex;

static MODULE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?:[A-Za-z_][A-Za-z0-9_]*::)+").expect("module prefix pattern compiles"));

pub trait NamingPolicy: Send + Sync {
    fn definition_name(&self, ty: &TypeDescriptor) -> Result<String>;
}

/// Uses the descriptor's canonical name as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalNames;

impl NamingPolicy for CanonicalNames {
    fn definition_name(&self, ty: &TypeDescriptor) -> Result<String> {
        non_empty(ty, ty.canonical_name().into_owned())
    }
}

/// Drops module paths, `bookstore::models::Book` becomes `Book`.
///
/// Every path inside the name is shortened on its own, so
/// `models::Page[models::Book]` becomes `Page[Book]` and `[]models::Book`
/// keeps its prefix as `[]Book`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortNames;

impl NamingPolicy for ShortNames {
    fn definition_name(&self, ty: &TypeDescriptor) -> Result<String> {
        let short = MODULE_PREFIX.replace_all(&ty.canonical_name(), "").into_owned();
        non_empty(ty, short)
    }
}

impl<F> NamingPolicy for F
where
    F: Fn(&TypeDescriptor) -> Option<String> + Send + Sync,
{
    fn definition_name(&self, ty: &TypeDescriptor) -> Result<String> {
        match self(ty) {
            Some(name) => non_empty(ty, name),
            None => Err(Error::invalid_type_reference(
                ty.canonical_name(),
                "naming policy could not resolve a name",
            )),
        }
    }
}

fn non_empty(ty: &TypeDescriptor, name: String) -> Result<String> {
    if name.is_empty() {
        return Err(Error::invalid_type_reference(
            ty.canonical_name(),
            "resolved name is empty",
        ));
    }
    Ok(name)
}
