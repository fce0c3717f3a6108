//! Managed-surface emitters: one Java source unit per metadata type, plus
//! the iterator proxies for synthesized Iterable projections.

use anyhow::Result;
use javabind_meta::{Method, TypeDef};

use crate::generate::generics::{
    GenericIterator, GenericKind, InterfaceSet, innermost_args, synthesized_name,
};
use crate::generate::methods::{NameStyle, arg_names, java_params, method_name, param_suffix};
use crate::generate::project::TypeSystem;
use crate::generate::writer::Writer;
use crate::generate::{Options, warning_header};

/// Emits the public class surface: constructors and methods delegating to
/// private natives, the interface list, and the static registration block.
pub fn class_unit(type_def: &TypeDef, interfaces: &InterfaceSet, opts: &Options) -> Result<String> {
    let mut w = Writer::new(&type_def.namespace, &opts.package_base);
    let package = w.java_package();
    let name = &type_def.name;

    w.push(&warning_header());
    w.push(&format!("package {package};\n\n"));
    w.push(&format!("public class {name} extends Inspectable"));
    w.push(&implements_clause(interfaces)?);
    w.push(" {\n\n");

    w.push(&format!(
        "    public {name}(long abi) {{\n        super(abi);\n    }}\n\n"
    ));
    w.push(&format!(
        "    public {name}({name} that) {{\n        super(that);\n    }}\n\n"
    ));

    for ctor in &type_def.constructors {
        write_public_constructor(&mut w, ctor, name)?;
    }
    for method in &type_def.methods {
        write_public_method(&mut w, method)?;
    }
    write_interface_methods(&mut w, interfaces)?;

    w.push(&format!(
        "    @Override\n    public boolean equals(Object other) {{\n        \
         if (other instanceof {name}) {{\n            return super.equals(other);\n        }}\n        \
         return false;\n    }}\n\n"
    ));

    for ctor in &type_def.constructors {
        write_native_constructor(&mut w, ctor)?;
    }
    for method in &type_def.methods {
        write_native_method(&mut w, method)?;
    }
    write_interface_natives(&mut w, interfaces)?;

    w.push("    private static native void jni_register();\n\n");
    w.push(&format!(
        "    static {{\n        System.loadLibrary(\"{}\");\n        jni_register();\n    }}\n}}\n",
        opts.shared_lib_for(&package)
    ));

    Ok(w.finish())
}

fn implements_clause(interfaces: &InterfaceSet) -> Result<String> {
    let mut clauses = Vec::new();
    for (kind, ifc) in interfaces.generic_entries() {
        if ifc.exclusive {
            continue;
        }
        let args = innermost_args(ifc)?.join(",");
        clauses.push(format!("{}<{args}>", kind.info().java_class));
    }
    for (name, ifc) in interfaces.named_entries() {
        if ifc.exclusive {
            continue;
        }
        clauses.push(name.to_string());
    }
    Ok(if clauses.is_empty() {
        String::new()
    } else {
        format!(" implements {}", clauses.join(", "))
    })
}

fn write_public_constructor(w: &mut Writer, ctor: &Method, type_name: &str) -> Result<()> {
    let params = java_params(w, &ctor.params)?;
    let suffix = param_suffix(w, &ctor.params)?;
    let args = arg_names(&ctor.params);
    w.push(&format!(
        "    public {type_name}({params}) {{\n        this(jni_construct{suffix}({args}));\n    }}\n\n"
    ));
    Ok(())
}

fn write_public_method(w: &mut Writer, method: &Method) -> Result<()> {
    let ret = w.project_return(method.return_type.as_ref(), TypeSystem::Java)?;
    let name = method_name(method, NameStyle::Java);
    let params = java_params(w, &method.params)?;
    let suffix = param_suffix(w, &method.params)?;
    let prefix = if method.return_type.is_some() {
        "return "
    } else {
        ""
    };
    let statics = if method.is_static { "static " } else { "" };
    let args = if method.is_static {
        arg_names(&method.params)
    } else if method.params.is_empty() {
        "abi".to_string()
    } else {
        format!("abi, {}", arg_names(&method.params))
    };
    w.push(&format!(
        "    public {statics}{ret} {name}({params}) {{\n        {prefix}jni_{name}{suffix}({args});\n    }}\n\n"
    ));
    Ok(())
}

fn write_interface_methods(w: &mut Writer, interfaces: &InterfaceSet) -> Result<()> {
    for (kind, ifc) in interfaces.generic_entries() {
        if kind == GenericKind::Iterable {
            let args = innermost_args(ifc)?.join(",");
            w.push(&format!(
                "    @Override\n    public java.util.Iterator<{args}> iterator() {{\n        \
                 return jni_iterator(abi);\n    }}\n\n"
            ));
        }
    }
    for (_, ifc) in interfaces.named_entries() {
        w.with_interface_scope(&ifc.generic_param_stack, |w| {
            for method in &ifc.methods {
                write_public_method(w, method)?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn write_native_constructor(w: &mut Writer, ctor: &Method) -> Result<()> {
    let suffix = param_suffix(w, &ctor.params)?;
    let params = java_params(w, &ctor.params)?;
    w.push(&format!(
        "    private static native long jni_construct{suffix}({params});\n\n"
    ));
    Ok(())
}

fn write_native_method(w: &mut Writer, method: &Method) -> Result<()> {
    let ret = w.project_return(method.return_type.as_ref(), TypeSystem::Java)?;
    let name = method_name(method, NameStyle::Java);
    let suffix = param_suffix(w, &method.params)?;
    let params = java_params(w, &method.params)?;
    let (statics, leading) = if method.is_static {
        ("static ", String::new())
    } else if params.is_empty() {
        ("", "long abi".to_string())
    } else {
        ("", "long abi, ".to_string())
    };
    w.push(&format!(
        "    private {statics}native {ret} jni_{name}{suffix}({leading}{params});\n\n"
    ));
    Ok(())
}

fn write_interface_natives(w: &mut Writer, interfaces: &InterfaceSet) -> Result<()> {
    for (kind, ifc) in interfaces.generic_entries() {
        if kind == GenericKind::Iterable {
            let proxy = synthesized_name(GenericKind::Iterable, innermost_args(ifc)?);
            w.push(&format!(
                "    private native {proxy} jni_iterator(long abi);\n\n"
            ));
        }
    }
    for (_, ifc) in interfaces.named_entries() {
        w.with_interface_scope(&ifc.generic_param_stack, |w| {
            for method in &ifc.methods {
                write_native_method(w, method)?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

/// Abstract method contracts only; interfaces get no bridge artifact.
pub fn interface_unit(type_def: &TypeDef, opts: &Options) -> Result<String> {
    let mut w = Writer::new(&type_def.namespace, &opts.package_base);
    let package = w.java_package();

    w.push(&warning_header());
    w.push(&format!("package {package};\n\n"));
    w.push(&format!("public interface {} {{\n\n", type_def.name));
    for method in &type_def.methods {
        let ret = w.project_return(method.return_type.as_ref(), TypeSystem::Java)?;
        let name = method_name(method, NameStyle::Java);
        let params = java_params(&w, &method.params)?;
        w.push(&format!("    public {ret} {name}({params});\n\n"));
    }
    w.push("}\n");
    Ok(w.finish())
}

/// Enum members are the fields carrying compile-time constants.
pub fn enum_unit(type_def: &TypeDef, opts: &Options) -> Result<String> {
    let mut w = Writer::new(&type_def.namespace, &opts.package_base);
    let package = w.java_package();
    let name = &type_def.name;

    let members = type_def
        .fields
        .iter()
        .filter_map(|field| {
            field
                .constant
                .map(|constant| format!("{}({constant})", field.name))
        })
        .collect::<Vec<_>>()
        .join(",\n    ");

    w.push(&warning_header());
    w.push(&format!("package {package};\n\n"));
    w.push(&format!(
        "public enum {name} {{\n    {members};\n\n    \
         private final int value;\n\n    \
         {name}(int value) {{\n        this.value = value;\n    }}\n\n    \
         public int value() {{\n        return value;\n    }}\n}}\n"
    ));
    Ok(w.finish())
}

/// Plain data carrier: one public field per metadata field.
pub fn struct_unit(type_def: &TypeDef, opts: &Options) -> Result<String> {
    let mut w = Writer::new(&type_def.namespace, &opts.package_base);
    let package = w.java_package();

    w.push(&warning_header());
    w.push(&format!("package {package};\n\n"));
    w.push(&format!("public class {} {{\n", type_def.name));
    for field in &type_def.fields {
        let ty = w.project(&field.ty, TypeSystem::Java)?;
        w.push(&format!("    public {ty} {};\n", field.name));
    }
    w.push("}\n");
    Ok(w.finish())
}

/// One iterator proxy per distinct Iterable instantiation.
pub fn iterator_proxy_unit(
    iterator: &GenericIterator,
    namespace: &str,
    opts: &Options,
) -> Result<String> {
    let mut w = Writer::new(namespace, &opts.package_base);
    let package = w.java_package();
    let name = &iterator.name;
    let element = iterator.java_element.replace('/', ".");

    w.push(&warning_header());
    w.push(&format!("package {package};\n\n"));
    w.push(&format!(
        "public class {name} extends Inspectable implements java.util.Iterator<{element}> {{\n\n    \
         public {name}(long abi) {{\n        super(abi);\n    }}\n\n    \
         public {name}(Inspectable that) {{\n        super(that);\n    }}\n\n    \
         @Override\n    public boolean hasNext() {{\n        return jni_hasNext(abi);\n    }}\n\n    \
         @Override\n    public {element} next() {{\n        return jni_next(abi);\n    }}\n\n    \
         private native boolean jni_hasNext(long abi);\n    \
         private native {element} jni_next(long abi);\n\n    \
         private static native void jni_register();\n\n    \
         static {{\n        System.loadLibrary(\"{}\");\n        jni_register();\n    }}\n}}\n",
        opts.shared_lib_for(&package)
    ));
    Ok(w.finish())
}
