use serde::Serialize;

/// Primitive element kinds understood by every projection table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ElementType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

/// One metadata type reference: a primitive element, a declared type, or a
/// positional reference into the enclosing generic parameter scope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeRef {
    Element(ElementType),
    Named { namespace: String, name: String },
    Generic(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Method {
    pub name: String,
    pub is_static: bool,
    /// Marks accessor sugar: `get_X` / `put_X` methods that project to
    /// getter/setter spellings on the managed surface.
    pub special_name: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeRef>,
}

impl Method {
    /// Constructors carry the reserved `.ctor` name by loader convention.
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor"
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    /// Compile-time constant value, present on enum members.
    pub constant: Option<i64>,
}

/// One implemented interface, as flattened by the metadata model: inherited
/// and re-exported interfaces are already expanded into this list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterfaceImpl {
    /// Qualified dotted interface name, e.g. `Sample.Widgets.IWidget`.
    pub name: String,
    /// Exclusive interfaces back a class's own members and are omitted from
    /// the managed `implements` list.
    pub exclusive: bool,
    /// Generic argument frames at the point of implementation, innermost
    /// last. Each frame is an ordered list of argument type spellings.
    pub generic_param_stack: Vec<Vec<String>>,
    pub methods: Vec<Method>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeDef {
    pub namespace: String,
    pub name: String,
    pub kind: TypeKind,
    pub constructors: Vec<Method>,
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
    pub interfaces: Vec<InterfaceImpl>,
}

impl TypeDef {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Namespace {
    pub name: String,
    pub types: Vec<TypeDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Model {
    pub namespaces: Vec<Namespace>,
}
