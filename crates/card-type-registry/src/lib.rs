//! Case-insensitive type registry used to dispatch Adaptive Card element and
//! action type names to parser and renderer handlers.
//!
//! The registry is a plain lookup table: it owns the handlers bound to each
//! type name and nothing else. Hosts extend the set of supported types by
//! calling [`TypeRegistry::set`] before processing documents that reference
//! them.

pub mod errors;
pub mod key;
pub mod registry;
pub mod shared;

pub use errors::RegistryError;
pub use key::{TypeKey, type_key};
pub use registry::TypeRegistry;
pub use shared::SharedTypeRegistry;
