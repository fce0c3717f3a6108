//! The projection engine: one deterministic traversal of the metadata
//! model, emitting a Java source unit per type and a JNI bridge unit per
//! namespace. Artifact content is a pure function of the model and the
//! fixed templates; two runs on identical input produce identical output.

pub mod generics;
pub mod java;
pub mod jni;
pub mod methods;
pub mod project;
pub mod session;
pub mod writer;

use std::path::PathBuf;

use anyhow::Result;
use javabind_meta::{Model, TypeKind};
use javabind_naming::{export_name, lower_case, slash_path};
use tracing::debug;

use crate::generate::generics::InterfaceSet;
use crate::generate::jni::FOUNDATION_NAMESPACE;
use crate::generate::session::{Filter, Session};
use crate::generate::writer::Writer;
use crate::version::VERSION;

/// Generation options supplied by the CLI boundary.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Prefix prepended to metadata namespaces to form Java packages.
    pub package_base: String,
    /// Shared library loaded by the static initializer of every generated
    /// class. Defaults to the lower-cased package when absent.
    pub shared_lib: Option<String>,
    /// Namespace/type allow-list.
    pub filter: Filter,
}

impl Options {
    pub fn shared_lib_for(&self, package: &str) -> String {
        self.shared_lib
            .clone()
            .unwrap_or_else(|| lower_case(package))
    }
}

/// One emitted source unit, with its path relative to the output root.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Header stamped onto every generated unit.
pub fn warning_header() -> String {
    format!("// WARNING: generated by javabind v{VERSION}; do not edit.\n")
}

fn java_unit_path(opts: &Options, namespace: &str, type_name: &str) -> PathBuf {
    let package = lower_case(&format!("{}{namespace}", opts.package_base));
    PathBuf::from(slash_path(&package)).join(format!("{type_name}.java"))
}

/// Runs the full generation pass over the model. Single-threaded and
/// synchronous; any malformed-metadata error aborts the run with no
/// partial artifact for the failing type.
pub fn generate(model: &Model, opts: &Options) -> Result<Vec<Artifact>> {
    let mut session = Session::new();
    let mut artifacts = Vec::new();

    for namespace in &model.namespaces {
        let mut bridge = Writer::new(&namespace.name, &opts.package_base);
        bridge.push(&jni::bridge_header(&namespace.name));

        if namespace.name == FOUNDATION_NAMESPACE {
            jni::inspectable_stub(&mut bridge, &mut session);
        }

        for type_def in &namespace.types {
            if !opts.filter.includes(&namespace.name, &type_def.name) {
                debug!(excluded = %type_def.qualified_name());
                continue;
            }

            let contents = match type_def.kind {
                TypeKind::Class => {
                    let interfaces = InterfaceSet::canonicalize(type_def)?;
                    jni::class_stub(&mut bridge, &mut session, type_def, &interfaces)?;
                    java::class_unit(type_def, &interfaces, opts)?
                }
                TypeKind::Interface => java::interface_unit(type_def, opts)?,
                TypeKind::Enum => java::enum_unit(type_def, opts)?,
                TypeKind::Struct => java::struct_unit(type_def, opts)?,
                // Delegates keep their empty-artifact placeholder contract.
                TypeKind::Delegate => String::new(),
            };
            artifacts.push(Artifact {
                path: java_unit_path(opts, &namespace.name, &type_def.name),
                contents,
            });
        }

        for iterator in session.drain_iterators() {
            jni::iterator_stub(&mut bridge, &mut session, &iterator);
            artifacts.push(Artifact {
                path: java_unit_path(opts, &namespace.name, &iterator.name),
                contents: java::iterator_proxy_unit(&iterator, &namespace.name, opts)?,
            });
        }

        jni::unregister_block(&mut bridge, &mut session);

        artifacts.push(Artifact {
            path: PathBuf::from(format!("{}.cpp", export_name(&namespace.name))),
            contents: bridge.finish(),
        });
    }

    Ok(artifacts)
}
