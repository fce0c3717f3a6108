use anyhow::{Result, bail};
use javabind_meta::TypeRef;
use javabind_naming::{lower_case, slash_path, strip_delimiters};

use crate::generate::project::{TypeSystem, element_spelling};

/// Accumulates one artifact's text and carries the projection context:
/// the namespace under emission, the Java package base, and the generic
/// parameter scope stack.
///
/// The stack is traversal-local: each writer owns its own frames, pushed
/// only through [`Writer::with_interface_scope`] so that every exit path
/// restores the previous depth.
pub struct Writer {
    out: String,
    pub current_namespace: String,
    pub package_base: String,
    generic_param_stack: Vec<Vec<String>>,
}

impl Writer {
    pub fn new(namespace: &str, package_base: &str) -> Self {
        Self {
            out: String::new(),
            current_namespace: namespace.to_string(),
            package_base: package_base.to_string(),
            generic_param_stack: Vec::new(),
        }
    }

    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Runs `body` with the interface's generic argument frames in scope.
    /// The frames are popped before returning, on success and on error
    /// alike; leaking a frame into a sibling interface would resolve its
    /// parameters against the wrong arguments.
    pub fn with_interface_scope<R>(
        &mut self,
        frames: &[Vec<String>],
        body: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        let depth = self.generic_param_stack.len();
        self.generic_param_stack.extend(frames.iter().cloned());
        let result = body(self);
        self.generic_param_stack.truncate(depth);
        result
    }

    /// Resolves a generic parameter reference against the scope stack,
    /// innermost frame first. Referencing a parameter with no enclosing
    /// scope means the caller violated the traversal contract, so the
    /// error aborts generation of the current run.
    pub fn resolve_generic(&self, index: usize) -> Result<&str> {
        for frame in self.generic_param_stack.iter().rev() {
            if let Some(spelling) = frame.get(index) {
                return Ok(spelling);
            }
        }
        bail!(
            "generic parameter !{index} referenced outside any interface scope \
             (in namespace {})",
            self.current_namespace
        )
    }

    /// Projects one metadata type reference into the requested coordinate
    /// system. Total over the type grammar; the only failure mode is a
    /// generic reference without an enclosing scope.
    pub fn project(&self, ty: &TypeRef, system: TypeSystem) -> Result<String> {
        Ok(match ty {
            TypeRef::Element(element) => element_spelling(*element, system).to_string(),
            TypeRef::Named { namespace, name } => match system {
                TypeSystem::Java => {
                    if *namespace == self.current_namespace {
                        name.clone()
                    } else {
                        format!("{}.{name}", self.java_package_for(namespace))
                    }
                }
                TypeSystem::Jni => "jobject".to_string(),
                TypeSystem::Descriptor => {
                    format!("L{}/{name};", slash_path(namespace))
                }
                TypeSystem::Suffix => name.clone(),
            },
            TypeRef::Generic(index) => {
                let spelling = self.resolve_generic(*index)?;
                match system {
                    TypeSystem::Java => spelling.to_string(),
                    TypeSystem::Jni => "jobject".to_string(),
                    TypeSystem::Descriptor => format!("L{};", self.qualified_slash(spelling)),
                    TypeSystem::Suffix => strip_delimiters(spelling),
                }
            }
        })
    }

    /// Projects an optional return type. Absent return types spell `void`
    /// on the managed surface and contribute an empty descriptor fragment.
    pub fn project_return(&self, ty: Option<&TypeRef>, system: TypeSystem) -> Result<String> {
        match ty {
            Some(ty) => self.project(ty, system),
            None => Ok(match system {
                TypeSystem::Java | TypeSystem::Jni => "void".to_string(),
                TypeSystem::Descriptor | TypeSystem::Suffix => String::new(),
            }),
        }
    }

    /// Lower-cased Java package for the namespace under emission.
    pub fn java_package(&self) -> String {
        self.java_package_for(&self.current_namespace)
    }

    pub fn java_package_for(&self, namespace: &str) -> String {
        lower_case(&format!("{}{namespace}", self.package_base))
    }

    /// Slash-qualified class path for a type in the current namespace,
    /// e.g. `Sample/Widgets/Widget`. Used for `projected_type` constants
    /// and synthesized-projection trait constants.
    pub fn class_path(&self, name: &str) -> String {
        format!("{}/{name}", slash_path(&self.current_namespace))
    }

    /// Qualifies a stored argument spelling into slash form: dotted names
    /// keep their own path, bare names resolve within the current namespace.
    pub fn qualified_slash(&self, spelling: &str) -> String {
        if spelling.contains('.') {
            slash_path(spelling)
        } else {
            self.class_path(spelling)
        }
    }
}
