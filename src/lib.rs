//! javabind projects a language-neutral metadata description of a type
//! system into a managed Java source surface and the JNI bridge layer that
//! marshals calls into the underlying native implementation.

pub mod cli;
pub mod generate;
pub mod utils;
pub mod version;

pub use javabind_meta as meta;
