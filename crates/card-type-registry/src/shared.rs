use std::{fmt, sync::Arc};

use parking_lot::RwLock;

use crate::{errors::RegistryError, registry::TypeRegistry};

/// A [`TypeRegistry`] behind a read-write lock, for hosts that register
/// handlers while other threads are parsing or rendering.
///
/// `set`/`remove` take the write lock; lookups take the read lock. Handlers
/// are returned as `Arc`s, so no lock is held while a handler runs.
pub struct SharedTypeRegistry<H: ?Sized> {
    inner: Arc<RwLock<TypeRegistry<H>>>,
}

impl<H: ?Sized> SharedTypeRegistry<H> {
    pub fn new() -> Self {
        Self::from_registry(TypeRegistry::new())
    }

    pub fn from_registry(registry: TypeRegistry<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn set(
        &self,
        type_name: impl Into<String>,
        handler: Arc<H>,
    ) -> Result<Option<Arc<H>>, RegistryError> {
        self.inner.write().set(type_name, handler)
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<H>> {
        self.inner.read().get(type_name)
    }

    pub fn resolve(&self, type_name: &str) -> Result<Arc<H>, RegistryError> {
        self.inner.read().resolve(type_name)
    }

    pub fn remove(&self, type_name: &str) -> Option<Arc<H>> {
        self.inner.write().remove(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.inner.read().contains(type_name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of the current table, detached from later mutations.
    pub fn snapshot(&self) -> TypeRegistry<H> {
        self.inner.read().clone()
    }
}

impl<H: ?Sized> Default for SharedTypeRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Clone for SharedTypeRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: ?Sized> From<TypeRegistry<H>> for SharedTypeRegistry<H> {
    fn from(registry: TypeRegistry<H>) -> Self {
        Self::from_registry(registry)
    }
}

impl<H: ?Sized> fmt::Debug for SharedTypeRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedTypeRegistry")
            .field(&*self.inner.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_observe_the_same_table() {
        let registry: SharedTypeRegistry<str> = SharedTypeRegistry::new();
        let other = registry.clone();
        registry.set("TextBlock", Arc::from("text")).unwrap();

        assert_eq!(other.get("textblock").as_deref(), Some("text"));
        other.remove("TEXTBLOCK");
        assert!(registry.get("TextBlock").is_none());
    }

    #[test]
    fn snapshot_is_detached() {
        let registry: SharedTypeRegistry<str> = SharedTypeRegistry::new();
        registry.set("Image", Arc::from("image")).unwrap();
        let snapshot = registry.snapshot();
        registry.remove("Image");

        assert!(snapshot.contains("image"));
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_registration_and_lookup() {
        let registry: SharedTypeRegistry<str> = SharedTypeRegistry::new();
        let writers: Vec<_> = (0..4)
            .map(|n| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let name = format!("Custom.T{n}.{i}");
                        registry.set(name.clone(), Arc::from(name.as_str())).unwrap();
                        assert!(registry.get(&name.to_uppercase()).is_some());
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().expect("writer thread");
        }
        assert_eq!(registry.len(), 200);
    }
}
