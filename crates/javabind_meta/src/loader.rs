use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::model::{
    ElementType, Field, InterfaceImpl, Method, Model, Namespace, Param, TypeDef, TypeKind, TypeRef,
};

#[derive(Clone, Debug, Deserialize)]
struct RawModel {
    #[serde(default)]
    namespaces: Vec<RawNamespace>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawNamespace {
    name: String,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawType {
    name: String,
    kind: RawKind,
    #[serde(default)]
    constructors: Vec<RawConstructor>,
    #[serde(default)]
    methods: Vec<RawMethod>,
    #[serde(default)]
    fields: Vec<RawField>,
    #[serde(default)]
    interfaces: Vec<RawInterface>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

#[derive(Clone, Debug, Deserialize)]
struct RawConstructor {
    #[serde(default)]
    params: Vec<RawParam>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default, rename = "static")]
    is_static: bool,
    /// Accessor-sugar flag. Defaults from the `get_` / `put_` name prefix
    /// when absent.
    #[serde(default)]
    special: Option<bool>,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    result: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    constant: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawInterface {
    name: String,
    #[serde(default)]
    exclusive: bool,
    /// Generic argument frames, innermost last.
    #[serde(default)]
    args: Vec<Vec<String>>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

/// Load a metadata model from a YAML description on disk.
pub fn load_model(path: &Path) -> Result<Model> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata at {}", path.display()))?;
    parse_model(&raw).with_context(|| format!("failed to parse metadata at {}", path.display()))
}

/// Parse a metadata model from YAML text. Exposed for tests and embedders.
pub fn parse_model(source: &str) -> Result<Model> {
    let raw: RawModel = serde_yaml::from_str(source).context("malformed metadata document")?;
    let namespaces = raw
        .namespaces
        .into_iter()
        .map(RawNamespace::try_into_namespace)
        .collect::<Result<Vec<_>>>()?;
    Ok(Model { namespaces })
}

impl RawNamespace {
    fn try_into_namespace(self) -> Result<Namespace> {
        let types = self
            .types
            .into_iter()
            .map(|ty| ty.try_into_type(&self.name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Namespace {
            name: self.name,
            types,
        })
    }
}

impl RawType {
    fn try_into_type(self, namespace: &str) -> Result<TypeDef> {
        let context = format!("{namespace}.{}", self.name);
        let constructors = self
            .constructors
            .into_iter()
            .map(|ctor| ctor.try_into_method(namespace))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in constructors of {context}"))?;
        let methods = self
            .methods
            .into_iter()
            .map(|method| method.try_into_method(namespace))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in methods of {context}"))?;
        let fields = self
            .fields
            .into_iter()
            .map(|field| field.try_into_field(namespace))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in fields of {context}"))?;
        let interfaces = self
            .interfaces
            .into_iter()
            .map(|ifc| ifc.try_into_interface(namespace))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in interfaces of {context}"))?;

        Ok(TypeDef {
            namespace: namespace.to_string(),
            name: self.name,
            kind: self.kind.into_kind(),
            constructors,
            methods,
            fields,
            interfaces,
        })
    }
}

impl RawKind {
    fn into_kind(self) -> TypeKind {
        match self {
            RawKind::Class => TypeKind::Class,
            RawKind::Interface => TypeKind::Interface,
            RawKind::Struct => TypeKind::Struct,
            RawKind::Enum => TypeKind::Enum,
            RawKind::Delegate => TypeKind::Delegate,
        }
    }
}

impl RawConstructor {
    fn try_into_method(self, namespace: &str) -> Result<Method> {
        let params = parse_params(self.params, namespace)?;
        Ok(Method {
            name: ".ctor".to_string(),
            is_static: false,
            special_name: false,
            params,
            return_type: None,
        })
    }
}

impl RawMethod {
    fn try_into_method(self, namespace: &str) -> Result<Method> {
        let special_name = self
            .special
            .unwrap_or_else(|| self.name.starts_with("get_") || self.name.starts_with("put_"));
        let params = parse_params(self.params, namespace)
            .with_context(|| format!("in method `{}`", self.name))?;
        let return_type = self
            .result
            .as_deref()
            .map(|ident| parse_type_ref(ident, namespace))
            .transpose()
            .with_context(|| format!("in method `{}`", self.name))?;

        Ok(Method {
            name: self.name,
            is_static: self.is_static,
            special_name,
            params,
            return_type,
        })
    }
}

impl RawField {
    fn try_into_field(self, namespace: &str) -> Result<Field> {
        let ty = parse_type_ref(&self.ty, namespace)
            .with_context(|| format!("in field `{}`", self.name))?;
        Ok(Field {
            name: self.name,
            ty,
            constant: self.constant,
        })
    }
}

impl RawInterface {
    fn try_into_interface(self, namespace: &str) -> Result<InterfaceImpl> {
        let methods = self
            .methods
            .into_iter()
            .map(|method| method.try_into_method(namespace))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in interface `{}`", self.name))?;
        Ok(InterfaceImpl {
            name: self.name,
            exclusive: self.exclusive,
            generic_param_stack: self.args,
            methods,
        })
    }
}

fn parse_params(params: Vec<RawParam>, namespace: &str) -> Result<Vec<Param>> {
    params
        .into_iter()
        .map(|param| {
            let ty = parse_type_ref(&param.ty, namespace)
                .with_context(|| format!("in parameter `{}`", param.name))?;
            Ok(Param {
                name: param.name,
                ty,
            })
        })
        .collect()
}

/// Parse one type identifier. Primitives use the short spellings below,
/// `!N` references the Nth enclosing generic parameter, and anything else is
/// a declared type (dotted when foreign, bare when in the same namespace).
fn parse_type_ref(identifier: &str, namespace: &str) -> Result<TypeRef> {
    if let Some(index) = identifier.strip_prefix('!') {
        let index = index
            .parse::<usize>()
            .map_err(|_| anyhow!("malformed generic parameter reference `{identifier}`"))?;
        return Ok(TypeRef::Generic(index));
    }

    let element = match identifier.to_ascii_lowercase().as_str() {
        "bool" | "boolean" => Some(ElementType::Boolean),
        "i8" | "byte" => Some(ElementType::Byte),
        "char" => Some(ElementType::Char),
        "i16" | "short" => Some(ElementType::Short),
        "i32" | "int" => Some(ElementType::Int),
        "i64" | "long" => Some(ElementType::Long),
        "f32" | "float" => Some(ElementType::Float),
        "f64" | "double" => Some(ElementType::Double),
        "str" | "string" => Some(ElementType::String),
        _ => None,
    };
    if let Some(element) = element {
        return Ok(TypeRef::Element(element));
    }

    if identifier.is_empty() {
        return Err(anyhow!("empty type identifier"));
    }

    match identifier.rsplit_once('.') {
        Some((ns, name)) => Ok(TypeRef::Named {
            namespace: ns.to_string(),
            name: name.to_string(),
        }),
        None => Ok(TypeRef::Named {
            namespace: namespace.to_string(),
            name: identifier.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_identifiers_parse_case_insensitively() {
        assert_eq!(
            parse_type_ref("Bool", "Sample").unwrap(),
            TypeRef::Element(ElementType::Boolean)
        );
        assert_eq!(
            parse_type_ref("string", "Sample").unwrap(),
            TypeRef::Element(ElementType::String)
        );
    }

    #[test]
    fn bare_names_resolve_to_the_current_namespace() {
        assert_eq!(
            parse_type_ref("Widget", "Sample.Widgets").unwrap(),
            TypeRef::Named {
                namespace: "Sample.Widgets".to_string(),
                name: "Widget".to_string(),
            }
        );
    }

    #[test]
    fn generic_references_parse_by_position() {
        assert_eq!(parse_type_ref("!1", "Sample").unwrap(), TypeRef::Generic(1));
        assert!(parse_type_ref("!x", "Sample").is_err());
    }

    #[test]
    fn accessor_prefix_defaults_the_special_flag() {
        let model = parse_model(
            r"
namespaces:
  - name: Sample
    types:
      - name: Widget
        kind: class
        methods:
          - name: get_Size
            result: i32
          - name: Close
",
        )
        .unwrap();
        let methods = &model.namespaces[0].types[0].methods;
        assert!(methods[0].special_name);
        assert!(!methods[1].special_name);
    }
}
