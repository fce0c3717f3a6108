use anyhow::Result;
use javabind::generate::methods::{bridge_entry_name, descriptor, method_name, NameStyle};
use javabind::generate::writer::Writer;
use javabind_meta::{ElementType, Method, Param, TypeRef};

fn method(name: &str, params: Vec<Param>, result: Option<TypeRef>) -> Method {
    Method {
        name: name.to_string(),
        is_static: false,
        special_name: name.starts_with("get_") || name.starts_with("put_"),
        params,
        return_type: result,
    }
}

fn param(name: &str, element: ElementType) -> Param {
    Param {
        name: name.to_string(),
        ty: TypeRef::Element(element),
    }
}

#[test]
fn accessor_projection_matches_the_managed_convention() {
    let getter = method("get_Size", Vec::new(), Some(TypeRef::Element(ElementType::Int)));
    assert_eq!(method_name(&getter, NameStyle::Java), "getSize");

    let setter = method("put_Size", vec![param("value", ElementType::Int)], None);
    assert_eq!(method_name(&setter, NameStyle::Java), "setSize");

    let plain = method("Close", Vec::new(), None);
    assert_eq!(method_name(&plain, NameStyle::Java), "close");
}

#[test]
fn string_parameter_descriptor_leads_the_integer_return() -> Result<()> {
    let w = Writer::new("Sample", "");
    let m = method(
        "Print",
        vec![param("text", ElementType::String)],
        Some(TypeRef::Element(ElementType::Int)),
    );
    assert_eq!(descriptor(&w, &m)?, "(JLjava/lang/String;)I");
    Ok(())
}

#[test]
fn overloads_disambiguate_by_parameter_suffix() -> Result<()> {
    let w = Writer::new("Sample", "");
    let with_string = method("Print", vec![param("text", ElementType::String)], None);
    let with_bool = method("Print", vec![param("flag", ElementType::Boolean)], None);

    let string_entry = bridge_entry_name(&w, &with_string)?;
    let bool_entry = bridge_entry_name(&w, &with_bool)?;
    assert_eq!(string_entry, "jni_printString");
    assert_eq!(bool_entry, "jni_printBoolean");
    assert_ne!(string_entry, bool_entry);
    Ok(())
}

#[test]
fn identical_parameter_sequences_collide_predictably() -> Result<()> {
    let w = Writer::new("Sample", "");
    let first = method("Print", vec![param("a", ElementType::Int)], None);
    let second = method("Print", vec![param("b", ElementType::Int)], None);
    // Same ordered parameter-type list, same entry point. Ambiguity at the
    // bridge is a caller error, not masked at generation time.
    assert_eq!(bridge_entry_name(&w, &first)?, bridge_entry_name(&w, &second)?);
    Ok(())
}

#[test]
fn static_methods_omit_the_instance_handle() -> Result<()> {
    let w = Writer::new("Sample", "");
    let mut m = method("Reset", Vec::new(), None);
    m.is_static = true;
    assert_eq!(descriptor(&w, &m)?, "()");

    m.is_static = false;
    assert_eq!(descriptor(&w, &m)?, "(J)");
    Ok(())
}

#[test]
fn constructors_always_return_the_reference_handle() -> Result<()> {
    let w = Writer::new("Sample", "");
    let ctor = Method {
        name: ".ctor".to_string(),
        is_static: false,
        special_name: false,
        params: vec![param("label", ElementType::String)],
        return_type: None,
    };
    assert_eq!(descriptor(&w, &ctor)?, "(Ljava/lang/String;)J");
    assert_eq!(bridge_entry_name(&w, &ctor)?, "jni_constructString");
    Ok(())
}
