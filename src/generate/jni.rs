//! Bridge-side emitters: one native source unit per namespace holding the
//! per-type binding structures, the load-time export functions, and the
//! teardown unregister block drained from the session ledger.

use anyhow::Result;
use javabind_meta::{Method, TypeDef};
use javabind_naming::export_name;

use crate::generate::generics::{
    GenericIterator, GenericKind, InterfaceSet, innermost_args, java_element_path,
    synthesized_name,
};
use crate::generate::methods::{
    NameStyle, bridge_entry_name, call_args, descriptor, jni_params, method_name,
};
use crate::generate::session::Session;
use crate::generate::writer::Writer;
use crate::generate::warning_header;

/// Reserved foundation namespace; the only one that emits the hand-rolled
/// `Inspectable` base stub.
pub const FOUNDATION_NAMESPACE: &str = "Windows.Foundation";

fn cpp_path(dotted: &str) -> String {
    dotted.replace('.', "::")
}

pub fn prolog(namespace: &str) -> String {
    format!(
        "// Java projection for the {namespace} namespace\n\n\
         #include \"pch.h\"\n\
         #include \"javabind.h\"\n\
         #include <string_view>\n\
         #include \"winrt/{namespace}.h\"\n\n\
         using namespace std::literals;\n\
         using namespace winrt;\n\n\
         #define JNI_EXPORT_NAMESPACE {}\n\n",
        export_name(namespace)
    )
}

fn export_fn(type_name: &str, namespace: &str) -> String {
    let export = format!("{}_{type_name}_jni_register", export_name(namespace));
    format!(
        "\nvoid JNICALL\n\
         {export}(jni_env* env, jclass cls) noexcept try\n\
         {{\n    \
             {type_name}::jni_register(*env, cls);\n\
         }}\n\
         catch (...)\n\
         {{\n    \
             env->raise_java_exception(\"{namespace}.{type_name}\");\n\
         }}"
    )
}

/// Emits one binding structure plus its load-time export for a class type,
/// and records the type in the registration ledger.
pub fn class_stub(
    w: &mut Writer,
    session: &mut Session,
    type_def: &TypeDef,
    interfaces: &InterfaceSet,
) -> Result<()> {
    let name = &type_def.name;
    let qualified = type_def.qualified_name();

    w.push(&format!(
        "struct {name} : Projection<{}::{name}>",
        cpp_path(&type_def.namespace)
    ));
    for (kind, _) in interfaces.generic_entries() {
        w.push(&format!(", {}<{name}>", kind.info().base_class));
    }
    w.push("\n{\n");
    w.push(&format!(
        "    static constexpr char projected_type[] = \"{}\";\n",
        w.class_path(name)
    ));
    write_generic_traits(w, session, interfaces)?;
    w.push("\n");

    for ctor in &type_def.constructors {
        write_constructor(w, ctor, &qualified)?;
    }
    for method in &type_def.methods {
        write_method(w, method, &qualified, &type_def.namespace, name)?;
    }
    for (_, ifc) in interfaces.named_entries() {
        w.with_interface_scope(&ifc.generic_param_stack, |w| {
            for method in &ifc.methods {
                write_method(w, method, &qualified, &type_def.namespace, name)?;
            }
            Ok(())
        })?;
    }

    w.push("    static void jni_register(jni_env& env, jclass cls)\n    {\n");
    w.push("        Projection::jni_register(env, cls);\n");
    for (kind, _) in interfaces.generic_entries() {
        w.push(&format!(
            "        {}::jni_register(env, cls);\n",
            kind.info().base_class
        ));
    }
    w.push("        static JNINativeMethod methods[] =\n        {\n");
    for ctor in &type_def.constructors {
        write_registration(w, ctor)?;
    }
    for method in &type_def.methods {
        write_registration(w, method)?;
    }
    for (_, ifc) in interfaces.named_entries() {
        w.with_interface_scope(&ifc.generic_param_stack, |w| {
            for method in &ifc.methods {
                write_registration(w, method)?;
            }
            Ok(())
        })?;
    }
    w.push("        };\n        env.register_natives(cls, methods);\n    }\n};\n");

    let namespace = w.current_namespace.clone();
    w.push(&export_fn(name, &namespace));
    w.push("\n\n");

    session.record_unregister(&namespace, name);
    Ok(())
}

/// Base-trait constants for each generic interface entry; Iterable entries
/// also register their synthesized iterator record with the session.
fn write_generic_traits(
    w: &mut Writer,
    session: &mut Session,
    interfaces: &InterfaceSet,
) -> Result<()> {
    for (kind, ifc) in interfaces.generic_entries() {
        let args = innermost_args(ifc)?;
        let name = synthesized_name(kind, args);

        if kind == GenericKind::Iterable {
            let joined = args.join(",");
            session.register_iterator(GenericIterator {
                name: name.clone(),
                native_element: joined.clone(),
                java_element: java_element_path(&joined, &w.current_namespace),
            });
        }

        w.push(&format!(
            "    static constexpr char {}[] = \"{}\";\n",
            kind.info().base_trait,
            w.class_path(&name)
        ));
    }
    Ok(())
}

fn write_constructor(w: &mut Writer, ctor: &Method, qualified: &str) -> Result<()> {
    let entry = bridge_entry_name(w, ctor)?;
    let params = jni_params(w, &ctor.params, true)?;
    let args = call_args(&ctor.params);
    w.push(&format!(
        "    static auto {entry}(jni_env& env, jclass{params})\n    {{\n        \
         return jni_guard(env, \"{qualified}\", [&] {{\n            \
         return create_agile_ref(type{{{args}}});\n        \
         }});\n    }}\n\n"
    ));
    Ok(())
}

fn write_method(
    w: &mut Writer,
    method: &Method,
    qualified: &str,
    namespace: &str,
    type_name: &str,
) -> Result<()> {
    let entry = bridge_entry_name(w, method)?;
    let params = jni_params(w, &method.params, true)?;
    let native = method_name(method, NameStyle::Native);
    let args = call_args(&method.params);
    if method.is_static {
        w.push(&format!(
            "    static auto {entry}(jni_env& env, jclass{params})\n    {{\n        \
             return jni_guard(env, \"{qualified}\", [&] {{\n            \
             return {}::{type_name}::{native}({args});\n        \
             }});\n    }}\n\n",
            cpp_path(namespace)
        ));
    } else {
        w.push(&format!(
            "    static auto {entry}(jni_env& env, jobject, jlong abi{params})\n    {{\n        \
             return jni_guard(env, \"{qualified}\", [&] {{\n            \
             return resolve{{abi}}.{native}({args});\n        \
             }});\n    }}\n\n"
        ));
    }
    Ok(())
}

fn write_registration(w: &mut Writer, method: &Method) -> Result<()> {
    let entry = bridge_entry_name(w, method)?;
    let descr = descriptor(w, method)?;
    w.push(&format!(
        "            JNI_METHOD_({entry}, \"{descr}\"),\n"
    ));
    Ok(())
}

/// The hand-rolled base projection for the foundation namespace: object
/// identity and lifetime entry points every generated class inherits.
pub fn inspectable_stub(w: &mut Writer, session: &mut Session) {
    w.push(
        "struct Inspectable : Projection<Windows::Foundation::IInspectable>\n\
         {\n    \
             static constexpr char projected_type[] = \"Windows/Foundation/Inspectable\";\n\n    \
             static auto jni_AddRef(jni_env&, jobject, jlong abi)\n    {\n        \
                 if (auto obj = agile_abi_ref::from(abi))\n        {\n            \
                     obj->addref();\n        }\n    }\n\n    \
             static auto jni_Release(jni_env&, jobject, jlong abi)\n    {\n        \
                 if (auto obj = agile_abi_ref::from(abi))\n        {\n            \
                     obj->release();\n        }\n    }\n\n    \
             static auto jni_GetClassName(jni_env&, jobject, jlong abi)\n    {\n        \
                 return get_class_name(resolve{abi});\n    }\n\n    \
             static auto jni_GetIdentity(jni_env&, jobject, jlong abi)\n    {\n        \
                 auto obj = resolve{abi};\n        \
                 return obj ? reinterpret_cast<jlong>(get_abi(obj)) : jlong{};\n    }\n\n    \
             static void jni_register(jni_env& env, jclass cls)\n    {\n        \
                 Projection::jni_register(env, cls);\n        \
                 static JNINativeMethod methods[] =\n        {\n            \
                     JNI_METHOD_(jni_AddRef, \"(J)V\"),\n            \
                     JNI_METHOD_(jni_Release, \"(J)V\"),\n            \
                     JNI_METHOD_(jni_GetClassName, \"(J)Ljava/lang/String;\"),\n            \
                     JNI_METHOD_(jni_GetIdentity, \"(J)J\"),\n        \
                 };\n        \
                 env.register_natives(cls, methods);\n    }\n};\n",
    );
    w.push(&export_fn("Inspectable", FOUNDATION_NAMESPACE));
    w.push("\n\n");
    session.record_unregister(FOUNDATION_NAMESPACE, "Inspectable");
}

/// One binding structure per recorded Iterable instantiation.
pub fn iterator_stub(w: &mut Writer, session: &mut Session, iterator: &GenericIterator) {
    let name = &iterator.name;
    w.push(&format!(
        "struct {name} : Projection<Windows::Foundation::Collections::IIterator<{}>>, Iterator<{name}>\n\
         {{\n    \
             static constexpr char projected_type[] = \"{}\";\n    \
             static constexpr char element_type[] = \"{}\";\n\n    \
             static void jni_register(jni_env& env, jclass cls)\n    {{\n        \
                 Projection::jni_register(env, cls);\n        \
                 Iterator::jni_register(env, cls);\n    }}\n}};\n",
        iterator.native_element,
        w.class_path(name),
        iterator.java_element
    ));
    let namespace = w.current_namespace.clone();
    w.push(&export_fn(name, &namespace));
    w.push("\n\n");
    session.record_unregister(&namespace, name);
}

/// Drains the ledger for this namespace into the aggregate unregister
/// function, installed to run at module unload.
pub fn unregister_block(w: &mut Writer, session: &mut Session) {
    let namespace = w.current_namespace.clone();
    let export = export_name(&namespace);
    w.push(&format!("void {export}_unregister(jni_env& env)\n{{\n"));
    for type_name in session.drain_unregisters(&namespace) {
        w.push(&format!("    {type_name}::jni_unregister(env);\n"));
    }
    w.push("}\n");
    w.push(&format!("JAVABIND_MODULE_UNLOAD({export}_unregister);\n"));
}

pub fn bridge_header(namespace: &str) -> String {
    format!("{}{}", warning_header(), prolog(namespace))
}
