use javabind_meta::ElementType;

/// The coordinate systems a metadata type can be projected into.
///
/// Each system has its own primitive spelling table below; those tables are
/// the single source of truth, so one primitive can never produce two
/// incompatible spellings within an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSystem {
    /// Managed-source spelling, e.g. `int`, `String`.
    Java,
    /// Bridge-native spelling, e.g. `jint`, `jstring`.
    Jni,
    /// Signature-descriptor fragment, e.g. `I`, `Ljava/lang/String;`.
    Descriptor,
    /// Bridge entry-point suffix used to disambiguate overloads, e.g. `Int`.
    Suffix,
}

pub fn element_spelling(element: ElementType, system: TypeSystem) -> &'static str {
    match system {
        TypeSystem::Java => match element {
            ElementType::Boolean => "boolean",
            ElementType::Byte => "byte",
            ElementType::Char => "char",
            ElementType::Short => "short",
            ElementType::Int => "int",
            ElementType::Long => "long",
            ElementType::Float => "float",
            ElementType::Double => "double",
            ElementType::String => "String",
        },
        TypeSystem::Jni => match element {
            ElementType::Boolean => "jboolean",
            ElementType::Byte => "jbyte",
            ElementType::Char => "jchar",
            ElementType::Short => "jshort",
            ElementType::Int => "jint",
            ElementType::Long => "jlong",
            ElementType::Float => "jfloat",
            ElementType::Double => "jdouble",
            ElementType::String => "jstring",
        },
        TypeSystem::Descriptor => match element {
            ElementType::Boolean => "Z",
            ElementType::Byte => "B",
            ElementType::Char => "C",
            ElementType::Short => "S",
            ElementType::Int => "I",
            ElementType::Long => "J",
            ElementType::Float => "F",
            ElementType::Double => "D",
            ElementType::String => "Ljava/lang/String;",
        },
        TypeSystem::Suffix => match element {
            ElementType::Boolean => "Boolean",
            ElementType::Byte => "Byte",
            ElementType::Char => "Char",
            ElementType::Short => "Short",
            ElementType::Int => "Int",
            ElementType::Long => "Long",
            ElementType::Float => "Float",
            ElementType::Double => "Double",
            ElementType::String => "String",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_fragments_are_stable_across_calls() {
        for element in [
            ElementType::Boolean,
            ElementType::Int,
            ElementType::String,
        ] {
            let first = element_spelling(element, TypeSystem::Descriptor);
            let second = element_spelling(element, TypeSystem::Descriptor);
            assert_eq!(first, second);
        }
        assert_eq!(element_spelling(ElementType::Int, TypeSystem::Descriptor), "I");
        assert_eq!(
            element_spelling(ElementType::String, TypeSystem::Descriptor),
            "Ljava/lang/String;"
        );
    }
}
