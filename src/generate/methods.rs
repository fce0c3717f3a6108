use anyhow::Result;
use javabind_meta::{ElementType, Method, Param, TypeRef};
use javabind_naming::{camel_case, mixed_case};

use crate::generate::project::TypeSystem;
use crate::generate::writer::Writer;

/// Which surface a method name is being spelled for. The managed surface
/// re-cases names and rewrites accessor sugar; the native call target keeps
/// the declared spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameStyle {
    Java,
    Native,
}

/// Projects a method's declared name. Constructors collapse to the reserved
/// `construct` name; `get_X` / `put_X` accessors become `getX` / `setX` on
/// the managed surface and the bare property name on the native one.
pub fn method_name(method: &Method, style: NameStyle) -> String {
    let name = if method.is_constructor() {
        "construct"
    } else {
        method.name.as_str()
    };
    if method.special_name {
        let accessor = name
            .strip_prefix("get_")
            .map(|bare| ("get", bare))
            .or_else(|| name.strip_prefix("put_").map(|bare| ("set", bare)));
        if let Some((verb, bare)) = accessor {
            return match style {
                NameStyle::Java => format!("{verb}{}", mixed_case(bare)),
                NameStyle::Native => bare.to_string(),
            };
        }
    }
    match style {
        NameStyle::Java => camel_case(name),
        NameStyle::Native => name.to_string(),
    }
}

/// Concatenated parameter-type suffixes. A pure function of the ordered
/// parameter-type list, so true overload collisions at the bridge collide
/// predictably rather than being masked.
pub fn param_suffix(w: &Writer, params: &[Param]) -> Result<String> {
    let mut suffix = String::new();
    for param in params {
        suffix.push_str(&w.project(&param.ty, TypeSystem::Suffix)?);
    }
    Ok(suffix)
}

/// Bridge entry-point name: `jni_<managed name><parameter suffixes>`.
pub fn bridge_entry_name(w: &Writer, method: &Method) -> Result<String> {
    Ok(format!(
        "jni_{}{}",
        method_name(method, NameStyle::Java),
        param_suffix(w, &method.params)?
    ))
}

/// Full signature-descriptor string for the native registration table.
/// Instance methods lead with the `J` handle fragment; constructors always
/// return the `J` of the created reference.
pub fn descriptor(w: &Writer, method: &Method) -> Result<String> {
    let mut fragments = String::new();
    if !method.is_constructor() && !method.is_static {
        fragments.push('J');
    }
    for param in &method.params {
        fragments.push_str(&w.project(&param.ty, TypeSystem::Descriptor)?);
    }
    let ret = if method.is_constructor() {
        "J".to_string()
    } else {
        w.project_return(method.return_type.as_ref(), TypeSystem::Descriptor)?
    };
    Ok(format!("({fragments}){ret}"))
}

/// Comma-separated `type name` pairs for a managed-source parameter list.
pub fn java_params(w: &Writer, params: &[Param]) -> Result<String> {
    let rendered = params
        .iter()
        .map(|param| {
            Ok(format!(
                "{} {}",
                w.project(&param.ty, TypeSystem::Java)?,
                param.name
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

/// Bridge-native parameter list, prefixed with `, ` when appended to the
/// fixed leading parameters of a stub signature.
pub fn jni_params(w: &Writer, params: &[Param], appending: bool) -> Result<String> {
    let rendered = params
        .iter()
        .map(|param| {
            Ok(format!(
                "{} {}",
                w.project(&param.ty, TypeSystem::Jni)?,
                param.name
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    if rendered.is_empty() {
        return Ok(String::new());
    }
    let joined = rendered.join(", ");
    Ok(if appending {
        format!(", {joined}")
    } else {
        joined
    })
}

/// Plain argument names for a managed call site.
pub fn arg_names(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Native call-site arguments. Every argument passes through unchanged
/// except string primitives, which are viewed through the native string
/// adapter at the call site.
pub fn call_args(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match param.ty {
            TypeRef::Element(ElementType::String) => {
                format!("jstring_view{{env, {}}}", param.name)
            }
            _ => param.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, special: bool) -> Method {
        Method {
            name: name.to_string(),
            is_static: false,
            special_name: special,
            params: Vec::new(),
            return_type: None,
        }
    }

    #[test]
    fn accessor_names_rewrite_per_surface() {
        let getter = method("get_Size", true);
        assert_eq!(method_name(&getter, NameStyle::Java), "getSize");
        assert_eq!(method_name(&getter, NameStyle::Native), "Size");

        let setter = method("put_Size", true);
        assert_eq!(method_name(&setter, NameStyle::Java), "setSize");
        assert_eq!(method_name(&setter, NameStyle::Native), "Size");
    }

    #[test]
    fn plain_names_only_recase() {
        let close = method("Close", false);
        assert_eq!(method_name(&close, NameStyle::Java), "close");
        assert_eq!(method_name(&close, NameStyle::Native), "Close");
    }

    #[test]
    fn constructors_use_the_reserved_name() {
        let ctor = method(".ctor", false);
        assert_eq!(method_name(&ctor, NameStyle::Java), "construct");
    }
}
