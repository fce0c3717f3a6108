//! Read-only metadata model consumed by the projection generator.
//!
//! The generator never mutates this model; it performs one deterministic
//! top-to-bottom traversal of namespaces, types, and members. The YAML
//! loader in [`loader`] is the only construction path outside of tests.

pub mod loader;
pub mod model;

pub use loader::{load_model, parse_model};
pub use model::{
    ElementType, Field, InterfaceImpl, Method, Model, Namespace, Param, TypeDef, TypeKind, TypeRef,
};
