//! Global name index: absolute name to message or enum handle.

use crate::error::SchemaError;
use crate::messages::{EnumId, MessageId};
use std::collections::HashMap;

/// Handle of a named declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    /// A message.
    Message(MessageId),
    /// An enum.
    Enum(EnumId),
}

/// Lookup table from absolute names (`.pkg.Outer.Inner`) to declarations.
///
/// Built once by the collector over the whole descriptor batch and passed
/// explicitly to the resolver.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: HashMap<String, TypeHandle>,
}

impl NameIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration.
    ///
    /// # Errors
    /// Returns `SchemaError::NameCollision` if the name is already taken.
    pub fn insert(&mut self, name: &str, handle: TypeHandle) -> Result<(), SchemaError> {
        if self.entries.contains_key(name) {
            return Err(SchemaError::NameCollision {
                name: name.to_string(),
            });
        }
        self.entries.insert(name.to_string(), handle);
        Ok(())
    }

    /// Looks up any declaration.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeHandle> {
        self.entries.get(name).copied()
    }

    /// Looks up a message by absolute name.
    #[must_use]
    pub fn find_message(&self, name: &str) -> Option<MessageId> {
        match self.get(name) {
            Some(TypeHandle::Message(id)) => Some(id),
            _ => None,
        }
    }

    /// Looks up an enum by absolute name.
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<EnumId> {
        match self.get(name) {
            Some(TypeHandle::Enum(id)) => Some(id),
            _ => None,
        }
    }
}
