use std::{collections::HashMap, fmt, sync::Arc};

use tracing::{debug, error};

use crate::{
    errors::RegistryError,
    key::{TypeKey, type_key},
};

struct Entry<H: ?Sized> {
    type_name: String,
    handler: Arc<H>,
}

impl<H: ?Sized> Clone for Entry<H> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Maps type names to handlers with case-insensitive lookup.
///
/// `H` is usually a trait object such as `dyn ElementParser`. Cloning a
/// registry clones the table, not the handlers: both copies share the same
/// `Arc`ed handler instances.
pub struct TypeRegistry<H: ?Sized> {
    entries: HashMap<TypeKey, Entry<H>>,
}

impl<H: ?Sized> TypeRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Binds `handler` to `type_name`, replacing any previous binding.
    ///
    /// Returns the handler that was previously bound, if any.
    pub fn set(
        &mut self,
        type_name: impl Into<String>,
        handler: Arc<H>,
    ) -> Result<Option<Arc<H>>, RegistryError> {
        let type_name = type_name.into();
        let key = type_key(&type_name);
        if key.as_str().is_empty() {
            return Err(RegistryError::EmptyTypeName);
        }
        let previous = self.entries.insert(
            key,
            Entry {
                type_name: type_name.trim().to_string(),
                handler,
            },
        );
        match &previous {
            Some(entry) => debug!(
                type_name = %type_name,
                replaced = %entry.type_name,
                "replaced registered handler"
            ),
            None => debug!(type_name = %type_name, "registered handler"),
        }
        Ok(previous.map(|entry| entry.handler))
    }

    /// Binds a handler under a compile-time type name.
    ///
    /// Used when populating a registry with built-in handlers, whose names
    /// are non-empty constants. An empty name is a programming error: it
    /// trips a debug assertion and is logged and ignored in release builds.
    pub fn register_builtin(&mut self, type_name: &'static str, handler: Arc<H>) {
        if let Err(err) = self.set(type_name, handler) {
            error!(type_name, error = %err, "built-in handler was not registered");
            debug_assert!(false, "built-in type name `{type_name}` rejected: {err}");
        }
    }

    /// Case-insensitive lookup. `None` means no handler is bound.
    pub fn get(&self, type_name: &str) -> Option<Arc<H>> {
        self.entries
            .get(&type_key(type_name))
            .map(|entry| Arc::clone(&entry.handler))
    }

    /// Like [`TypeRegistry::get`] but reports a miss as
    /// [`RegistryError::NotFound`].
    pub fn resolve(&self, type_name: &str) -> Result<Arc<H>, RegistryError> {
        self.get(type_name)
            .ok_or_else(|| RegistryError::not_found(type_name))
    }

    /// Unbinds `type_name`. Removing an unknown name is a no-op.
    pub fn remove(&mut self, type_name: &str) -> Option<Arc<H>> {
        let removed = self.entries.remove(&type_key(type_name));
        if removed.is_some() {
            debug!(type_name = %type_name, "removed registered handler");
        }
        removed.map(|entry| entry.handler)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(&type_key(type_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered type names, in the spelling of their latest registration,
    /// sorted by canonical key.
    pub fn type_names(&self) -> Vec<String> {
        let mut keyed: Vec<(&TypeKey, &str)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.type_name.as_str()))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(b.0));
        keyed.into_iter().map(|(_, name)| name.to_string()).collect()
    }
}

impl<H: ?Sized> Default for TypeRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Clone for TypeRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for TypeRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
