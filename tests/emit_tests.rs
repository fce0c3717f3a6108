use std::fs;
use std::path::Path;

use anyhow::Result;
use javabind::generate::session::Filter;
use javabind::generate::{Artifact, Options, generate};
use javabind_meta::parse_model;

const WIDGET_MODEL: &str = r#"
namespaces:
  - name: Sample.Widgets
    types:
      - name: Widget
        kind: class
        constructors:
          - params: []
          - params:
              - name: label
                type: string
        methods:
          - name: get_Value
            result: i32
"#;

fn artifact<'a>(artifacts: &'a [Artifact], path: &str) -> &'a Artifact {
    artifacts
        .iter()
        .find(|a| a.path == Path::new(path))
        .unwrap_or_else(|| panic!("missing artifact {path}"))
}

#[test]
fn widget_class_emits_both_surfaces_and_one_ledger_entry() -> Result<()> {
    let model = parse_model(WIDGET_MODEL)?;
    let artifacts = generate(&model, &Options::default())?;

    let java = &artifact(&artifacts, "sample/widgets/Widget.java").contents;
    assert!(java.contains("public class Widget extends Inspectable {"));
    assert!(java.contains("public Widget() {\n        this(jni_construct());"));
    assert!(java.contains("public Widget(String label) {\n        this(jni_constructString(label));"));
    assert!(java.contains("public int getValue() {\n        return jni_getValue(abi);"));
    assert!(java.contains("private static native long jni_construct();"));
    assert!(java.contains("private static native long jni_constructString(String label);"));
    assert!(java.contains("private native int jni_getValue(long abi);"));
    assert!(java.contains("System.loadLibrary(\"sample.widgets\");"));

    let bridge = &artifact(&artifacts, "Sample_Widgets.cpp").contents;
    assert!(bridge.contains("struct Widget : Projection<Sample::Widgets::Widget>"));
    assert!(bridge.contains("JNI_METHOD_(jni_construct, \"()J\"),"));
    assert!(bridge.contains("JNI_METHOD_(jni_constructString, \"(Ljava/lang/String;)J\"),"));
    assert!(bridge.contains("JNI_METHOD_(jni_getValue, \"(J)I\"),"));
    assert!(bridge.contains("return resolve{abi}.Value();"));
    assert!(bridge.contains("Sample_Widgets_Widget_jni_register"));
    assert!(bridge.contains("raise_java_exception(\"Sample.Widgets.Widget\")"));

    // Recorded exactly once in the unregister block.
    assert_eq!(bridge.matches("Widget::jni_unregister(env);").count(), 1);
    Ok(())
}

#[test]
fn generation_is_deterministic() -> Result<()> {
    let model = parse_model(WIDGET_MODEL)?;
    let first = generate(&model, &Options::default())?;
    let second = generate(&model, &Options::default())?;
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.contents, b.contents);
    }
    Ok(())
}

#[test]
fn filtered_types_leave_no_artifact_and_no_ledger_entry() -> Result<()> {
    let model = parse_model(
        r"
namespaces:
  - name: Sample.Widgets
    types:
      - name: First
        kind: class
      - name: Excluded
        kind: class
      - name: Second
        kind: class
",
    )?;
    let options = Options {
        filter: Filter::new(vec![
            "Sample.Widgets.First".to_string(),
            "Sample.Widgets.Second".to_string(),
        ]),
        ..Options::default()
    };
    let artifacts = generate(&model, &options)?;

    assert!(
        !artifacts
            .iter()
            .any(|a| a.path.to_string_lossy().contains("Excluded"))
    );

    let bridge = &artifact(&artifacts, "Sample_Widgets.cpp").contents;
    assert!(!bridge.contains("Excluded"));

    // Drained in recording order, excluded types contributing nothing.
    let unregister_at = |name: &str| {
        bridge
            .find(&format!("{name}::jni_unregister(env);"))
            .unwrap_or_else(|| panic!("missing unregister for {name}"))
    };
    assert!(unregister_at("First") < unregister_at("Second"));
    Ok(())
}

#[test]
fn interfaces_structs_and_enums_emit_without_bridge_stubs() -> Result<()> {
    let model = parse_model(
        r"
namespaces:
  - name: Sample.Widgets
    types:
      - name: IClosable
        kind: interface
        methods:
          - name: Close
      - name: Point
        kind: struct
        fields:
          - name: X
            type: i32
          - name: Y
            type: i32
      - name: Color
        kind: enum
        fields:
          - name: Red
            type: i32
            constant: 0
          - name: Green
            type: i32
            constant: 1
      - name: Handler
        kind: delegate
",
    )?;
    let artifacts = generate(&model, &Options::default())?;

    let ifc = &artifact(&artifacts, "sample/widgets/IClosable.java").contents;
    assert!(ifc.contains("public interface IClosable {"));
    assert!(ifc.contains("public void close();"));

    let point = &artifact(&artifacts, "sample/widgets/Point.java").contents;
    assert!(point.contains("public int X;"));
    assert!(point.contains("public int Y;"));

    let color = &artifact(&artifacts, "sample/widgets/Color.java").contents;
    assert!(color.contains("Red(0),\n    Green(1);"));
    assert!(color.contains("public int value()"));

    // Delegates keep the empty-artifact placeholder contract.
    assert!(artifact(&artifacts, "sample/widgets/Handler.java").contents.is_empty());

    let bridge = &artifact(&artifacts, "Sample_Widgets.cpp").contents;
    assert!(!bridge.contains("struct IClosable"));
    assert!(!bridge.contains("struct Point"));
    assert!(!bridge.contains("struct Color"));
    Ok(())
}

#[test]
fn duplicate_iterable_instantiations_emit_one_proxy() -> Result<()> {
    let model = parse_model(
        r#"
namespaces:
  - name: Sample.Widgets
    types:
      - name: Bag
        kind: class
        interfaces:
          - name: "Windows.Foundation.Collections.IIterable`1"
            args: [[String]]
      - name: Sack
        kind: class
        interfaces:
          - name: "Windows.Foundation.Collections.IIterable`1"
            args: [[String]]
"#,
    )?;
    let artifacts = generate(&model, &Options::default())?;

    let proxies = artifacts
        .iter()
        .filter(|a| a.path == Path::new("sample/widgets/StringIterator.java"))
        .count();
    assert_eq!(proxies, 1);

    let bridge = &artifact(&artifacts, "Sample_Widgets.cpp").contents;
    assert_eq!(bridge.matches("struct StringIterator").count(), 1);
    assert_eq!(
        bridge.matches("StringIterator::jni_unregister(env);").count(),
        1
    );

    // Both classes point at the same synthesized projection.
    assert_eq!(
        bridge
            .matches("static constexpr char iterator_type[] = \"Sample/Widgets/StringIterator\";")
            .count(),
        2
    );

    let proxy = &artifact(&artifacts, "sample/widgets/StringIterator.java").contents;
    assert!(proxy.contains("implements java.util.Iterator<Sample.Widgets.String>"));
    Ok(())
}

#[test]
fn each_namespace_emits_its_own_iterator_proxy() -> Result<()> {
    let model = parse_model(
        r#"
namespaces:
  - name: Alpha
    types:
      - name: Bag
        kind: class
        interfaces:
          - name: "Windows.Foundation.Collections.IIterable`1"
            args: [[String]]
  - name: Beta
    types:
      - name: Sack
        kind: class
        interfaces:
          - name: "Windows.Foundation.Collections.IIterable`1"
            args: [[String]]
"#,
    )?;
    let artifacts = generate(&model, &Options::default())?;

    // Proxies and their class paths are namespace-relative, so each
    // namespace referencing the instantiation carries its own stub and
    // proxy; suppressing the second would leave Beta's iterator_type
    // constant pointing at a class that never exists.
    for (bridge_path, proxy_path, ns) in [
        ("Alpha.cpp", "alpha/StringIterator.java", "Alpha"),
        ("Beta.cpp", "beta/StringIterator.java", "Beta"),
    ] {
        let bridge = &artifact(&artifacts, bridge_path).contents;
        assert!(bridge.contains(&format!(
            "static constexpr char iterator_type[] = \"{ns}/StringIterator\";"
        )));
        assert!(bridge.contains("struct StringIterator"));
        assert_eq!(
            bridge.matches("StringIterator::jni_unregister(env);").count(),
            1
        );

        let proxy = &artifact(&artifacts, proxy_path).contents;
        assert!(proxy.contains(&format!("implements java.util.Iterator<{ns}.String>")));
    }
    Ok(())
}

#[test]
fn package_base_and_shared_lib_flow_into_the_managed_surface() -> Result<()> {
    let model = parse_model(WIDGET_MODEL)?;
    let options = Options {
        package_base: "Com.Contoso.".to_string(),
        shared_lib: Some("contoso_native".to_string()),
        ..Options::default()
    };
    let artifacts = generate(&model, &options)?;

    let java = &artifact(&artifacts, "com/contoso/sample/widgets/Widget.java").contents;
    assert!(java.contains("package com.contoso.sample.widgets;"));
    assert!(java.contains("System.loadLibrary(\"contoso_native\");"));
    Ok(())
}

#[test]
fn foundation_namespace_gains_the_inspectable_stub() -> Result<()> {
    let model = parse_model(
        r"
namespaces:
  - name: Windows.Foundation
    types:
      - name: Uri
        kind: class
",
    )?;
    let artifacts = generate(&model, &Options::default())?;
    let bridge = &artifact(&artifacts, "Windows_Foundation.cpp").contents;

    assert!(bridge.contains("struct Inspectable : Projection<Windows::Foundation::IInspectable>"));
    assert!(bridge.contains("JNI_METHOD_(jni_GetClassName, \"(J)Ljava/lang/String;\"),"));
    let unregister_at = |name: &str| {
        bridge
            .find(&format!("{name}::jni_unregister(env);"))
            .unwrap_or_else(|| panic!("missing unregister for {name}"))
    };
    assert!(unregister_at("Inspectable") < unregister_at("Uri"));
    Ok(())
}

#[test]
fn artifacts_write_under_the_output_root() -> Result<()> {
    let model = parse_model(WIDGET_MODEL)?;
    let artifacts = generate(&model, &Options::default())?;

    let out = tempfile::tempdir()?;
    for artifact in &artifacts {
        let path = out.path().join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &artifact.contents)?;
    }

    assert!(out.path().join("sample/widgets/Widget.java").exists());
    assert!(out.path().join("Sample_Widgets.cpp").exists());
    Ok(())
}
