//! Casing and identifier transforms shared by every emitter.
//!
//! All functions here are pure string transforms. The projection engine
//! relies on them being deterministic: the same input must always produce
//! the same spelling within one generation pass.

/// Lowercases the first character, leaving the rest untouched.
/// `Close` becomes `close`; an already camel-cased name passes through.
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character, leaving the rest untouched.
/// Used to build `get<Name>` / `set<Name>` accessor spellings.
pub fn mixed_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the whole string. Java package segments are lower-case by
/// convention even when the metadata namespace is not.
pub fn lower_case(name: &str) -> String {
    name.to_lowercase()
}

/// Removes the `.` and `,` delimiters from a concatenated argument-type
/// spelling. This is how synthesized generic projection names are derived:
/// `Sample.Item,String` collapses to `SampleItemString`.
pub fn strip_delimiters(spelling: &str) -> String {
    spelling.chars().filter(|c| *c != '.' && *c != ',').collect()
}

/// Turns a dotted namespace into the flat form used for exported symbol
/// names: `Sample.Widgets` becomes `Sample_Widgets`.
pub fn export_name(namespace: &str) -> String {
    namespace.replace('.', "_")
}

/// Turns a dotted path into the slash form used by class descriptors:
/// `Sample.Widgets` becomes `Sample/Widgets`.
pub fn slash_path(dotted: &str) -> String {
    dotted.replace('.', "/")
}
