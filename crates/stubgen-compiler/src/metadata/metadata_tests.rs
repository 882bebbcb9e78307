use std::fs;
use std::path::Path;

use stubgen_core::{Literal, MemberKind};
use tempfile::TempDir;

use super::*;
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{descriptor_set, read, read_with};

fn messages(metadata: &Metadata) -> Vec<String> {
    metadata
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn only_visible_declarations_survive() {
    let metadata = read(
        r#"[
            { "namespace": "Acme", "name": "Hidden", "kind": "class", "accessibility": "internal",
              "nested_types": [{ "name": "Inner", "kind": "class" }] },
            {
                "namespace": "Acme",
                "name": "Widget",
                "kind": "class",
                "members": [
                    { "kind": "method", "name": "Run" },
                    { "kind": "method", "name": "Helper", "accessibility": "private" },
                    { "kind": "method", "name": "Core", "accessibility": "internal" },
                    { "kind": "method", "name": "Narrow", "accessibility": "private_protected" },
                    { "kind": "method", "name": "OnRun", "accessibility": "protected" },
                    { "kind": "method", "name": "Dispose", "accessibility": "private",
                      "explicit_interface": "System.IDisposable" }
                ],
                "nested_types": [
                    { "name": "Secret", "kind": "class", "accessibility": "private" },
                    { "name": "Options", "kind": "class", "accessibility": "protected_internal" }
                ]
            }
        ]"#,
    );

    assert_eq!(metadata.types.len(), 1);
    let widget = &metadata.types[0];
    assert_eq!(widget.name, "Widget");

    let names: Vec<_> = widget.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Dispose", "OnRun", "Run"]);
    let nested: Vec<_> = widget.nested_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(nested, ["Options"]);
    assert!(metadata.diagnostics.is_empty());
}

#[test]
fn protected_declarations_can_be_excluded() {
    let config = Config::new().include_protected(false);
    let metadata = read_with(
        r#"[{
            "name": "Widget",
            "kind": "class",
            "members": [
                { "kind": "method", "name": "Run" },
                { "kind": "method", "name": "OnRun", "accessibility": "protected" }
            ],
            "nested_types": [{ "name": "Options", "kind": "class", "accessibility": "protected" }]
        }]"#,
        &config,
    );

    let widget = &metadata.types[0];
    assert_eq!(widget.members.len(), 1);
    assert_eq!(widget.members[0].name, "Run");
    assert!(widget.nested_types.is_empty());
}

#[test]
fn unsupported_members_are_skipped_with_warnings() {
    let metadata = read(
        r#"[{
            "namespace": "Acme",
            "name": "Buffer",
            "kind": "class",
            "members": [
                { "kind": "field", "name": "Ptr", "type": { "kind": "pointer", "pointee": "System.Byte" } },
                { "kind": "method", "name": "Call", "parameters": [{ "name": "f", "type": { "kind": "function_pointer" } }] },
                { "kind": "operator", "name": "op_CheckedAddition", "type": "Acme.Buffer" },
                { "kind": "operator", "name": "op_Implicit" },
                { "kind": "indexer", "type": "System.Byte", "accessors": ["get"] },
                { "kind": "property", "name": "Length", "type": "System.Int32" },
                { "kind": "property", "name": "Capacity", "accessors": ["get"] },
                { "kind": "finalizer", "name": "Finalize" },
                { "kind": "method", "name": "" },
                { "kind": "method", "name": "Clear" }
            ]
        }]"#,
    );

    let buffer = &metadata.types[0];
    assert_eq!(buffer.members.len(), 1);
    assert_eq!(buffer.members[0].name, "Clear");
    assert_eq!(
        metadata
            .diagnostics
            .count_of(DiagnosticKind::UnsupportedConstruct),
        9
    );
    assert_eq!(
        messages(&metadata),
        [
            "warning: Acme.Buffer.Ptr: unsupported construct: pointer type",
            "warning: Acme.Buffer.Call: unsupported construct: function pointer type",
            "warning: Acme.Buffer.op_CheckedAddition: unsupported construct: operator `op_CheckedAddition` has no source spelling",
            "warning: Acme.Buffer.op_Implicit: unsupported construct: conversion operator without a target type",
            "warning: Acme.Buffer.this[]: unsupported construct: indexer without parameters",
            "warning: Acme.Buffer.Length: unsupported construct: property without accessors",
            "warning: Acme.Buffer.Capacity: unsupported construct: property without a type",
            "warning: Acme.Buffer.Finalize: unsupported construct: unrecognized member kind",
            "warning: Acme.Buffer.: unsupported construct: method without a name",
        ]
    );
}

#[test]
fn unsupported_types_are_skipped_with_warnings() {
    let metadata = read(
        r#"[
            { "namespace": "Acme", "name": "Point", "kind": "record" },
            { "namespace": "Acme", "name": "Callback", "kind": "delegate" },
            { "namespace": "Acme", "name": "Ratio", "kind": "enum", "underlying_type": "System.Double" },
            { "namespace": "Acme", "name": "Handle", "kind": "struct",
              "interfaces": [{ "kind": "pointer", "pointee": "System.Void" }] },
            { "namespace": "Acme", "name": "Kept", "kind": "struct" }
        ]"#,
    );

    assert_eq!(metadata.types.len(), 1);
    assert_eq!(metadata.types[0].name, "Kept");
    assert_eq!(
        messages(&metadata),
        [
            "warning: Acme.Point: unsupported construct: unrecognized type kind",
            "warning: Acme.Callback: unsupported construct: delegate without a signature",
            "warning: Acme.Ratio: unsupported construct: enum backing type is not integral",
            "warning: Acme.Handle: unsupported construct: pointer type",
        ]
    );
}

#[test]
fn enum_and_interface_shape_rules() {
    let metadata = read(
        r#"[
            {
                "name": "Level",
                "kind": "enum",
                "members": [
                    { "kind": "field", "name": "Low", "constant": 0 },
                    { "kind": "field", "name": "Broken", "constant": "high" },
                    { "kind": "method", "name": "ToString", "type": "System.String" }
                ]
            },
            {
                "name": "IThing",
                "kind": "interface",
                "members": [{ "kind": "constructor" }]
            }
        ]"#,
    );

    let level = metadata.types.iter().find(|t| t.name == "Level").unwrap();
    assert_eq!(level.members.len(), 1);
    assert_eq!(level.members[0].name, "Low");
    let thing = metadata.types.iter().find(|t| t.name == "IThing").unwrap();
    assert!(thing.members.is_empty());
    assert_eq!(
        messages(&metadata),
        [
            "warning: Level.Broken: unsupported construct: enum member without an integral value",
            "warning: Level.ToString: unsupported construct: enum member without an integral value",
            "warning: IThing..ctor: unsupported construct: constructor on an interface",
        ]
    );
}

#[test]
fn duplicate_members_keep_one() {
    let metadata = read(
        r#"[{
            "namespace": "Acme",
            "name": "Stream",
            "kind": "class",
            "members": [
                { "kind": "method", "name": "Read", "parameters": [{ "name": "count", "type": "System.Int32", "modifier": "ref" }] },
                { "kind": "method", "name": "Read", "parameters": [{ "name": "count", "type": "System.Int32", "modifier": "out" }] },
                { "kind": "method", "name": "Read", "parameters": [{ "name": "count", "type": "System.Int32" }] },
                { "kind": "field", "name": "Position", "type": "System.Int64" },
                { "kind": "property", "name": "Position", "type": "System.Int64", "accessors": ["get"] }
            ]
        }]"#,
    );

    let stream = &metadata.types[0];
    assert_eq!(stream.members.len(), 3);
    assert_eq!(
        metadata.diagnostics.count_of(DiagnosticKind::DuplicateMember),
        2
    );
    let dup: Vec<_> = metadata
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::DuplicateMember)
        .map(|d| d.message.clone())
        .collect();
    assert!(dup.contains(&"duplicate member signature `Read(ref int)`".to_string()));
    assert!(dup.contains(&"duplicate member signature `Position`".to_string()));
}

#[test]
fn duplicate_types_keep_one() {
    let metadata = read(
        r#"[
            { "namespace": "Acme", "name": "Widget", "kind": "class" },
            { "namespace": "Acme", "name": "Widget", "kind": "class" },
            { "namespace": "Acme", "name": "Widget", "kind": "class",
              "generic_params": [{ "name": "T" }] }
        ]"#,
    );

    assert_eq!(metadata.types.len(), 2);
    assert_eq!(
        messages(&metadata),
        ["warning: Acme: `Acme.Widget` is declared more than once"]
    );
}

#[test]
fn canonical_order_ignores_input_order() {
    let a = read(
        r#"[
            { "namespace": "B", "name": "Second", "kind": "class" },
            { "namespace": "A", "name": "First", "kind": "class", "members": [
                { "kind": "method", "name": "b" }, { "kind": "method", "name": "A" }
            ] }
        ]"#,
    );
    let b = read(
        r#"[
            { "namespace": "A", "name": "First", "kind": "class", "members": [
                { "kind": "method", "name": "A" }, { "kind": "method", "name": "b" }
            ] },
            { "namespace": "B", "name": "Second", "kind": "class" }
        ]"#,
    );
    assert_eq!(a.types, b.types);
    assert_eq!(a.types[0].name, "First");
    assert_eq!(a.types[0].members[0].kind, MemberKind::Method);
    assert_eq!(a.types[0].members[0].name, "A");
}

#[test]
fn counts_include_nested_types() {
    let metadata = read(
        r#"[{
            "name": "Outer",
            "kind": "class",
            "members": [{ "kind": "method", "name": "Run" }],
            "nested_types": [{
                "name": "Inner",
                "kind": "class",
                "members": [{ "kind": "method", "name": "Go" }]
            }]
        }]"#,
    );
    assert_eq!(metadata.type_count(), 2);
    assert_eq!(metadata.member_count(), 2);
}

#[test]
fn missing_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = MetadataReader::default().read(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::MetadataUnavailable {
            cause: MetadataCause::NotFound,
            ..
        }
    ));
}

#[test]
fn reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.json");
    fs::write(
        &path,
        descriptor_set(r#"[{ "name": "Foo", "kind": "class" }]"#),
    )
    .unwrap();

    let metadata = MetadataReader::default().read(&path).unwrap();
    assert_eq!(metadata.artifact.name, "Test");
    assert_eq!(metadata.types[0].name, "Foo");
}

#[test]
fn malformed_json_is_unavailable() {
    let err = MetadataReader::default()
        .from_source("{ \"artifact\": [", Path::new("broken.json"))
        .unwrap_err();
    let Error::MetadataUnavailable { path, cause } = err else {
        panic!("expected MetadataUnavailable");
    };
    assert_eq!(path, Path::new("broken.json"));
    assert!(matches!(cause, MetadataCause::Malformed { .. }));
}

#[test]
fn unusable_artifact_names_are_rejected() {
    for name in ["", "  ", "../escape", "a/b", "what?"] {
        let source = format!(r#"{{ "artifact": {{ "name": "{name}" }}, "types": [] }}"#);
        let err = MetadataReader::default()
            .from_source(&source, Path::new("x.json"))
            .unwrap_err();
        assert!(
            matches!(
                err,
                Error::MetadataUnavailable {
                    cause: MetadataCause::Invalid(_),
                    ..
                }
            ),
            "{name:?} accepted"
        );
    }
}

#[test]
fn interface_members_follow_their_own_accessibility() {
    let metadata = read(
        r#"[{
            "namespace": "Acme",
            "name": "IWidget",
            "kind": "interface",
            "members": [
                { "kind": "method", "name": "Run" },
                { "kind": "method", "name": "Secret", "accessibility": "private", "modifiers": ["static"] },
                { "kind": "method", "name": "Hidden", "accessibility": "internal" }
            ]
        }]"#,
    );

    let names: Vec<_> = metadata.types[0]
        .members
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, ["Run"]);
    assert!(metadata.diagnostics.is_empty());
}

#[test]
fn names_that_are_not_identifiers_are_errors() {
    let metadata = read(
        r#"[
            { "namespace": "Acme", "name": "List`1", "kind": "class" },
            {
                "namespace": "Acme",
                "name": "Widget",
                "kind": "class",
                "members": [
                    { "kind": "method", "name": "<Run>b__0" },
                    { "kind": "method", "name": "Run", "parameters": [{ "name": "2nd", "type": "System.Int32" }] },
                    { "kind": "method", "name": "Stop", "parameters": [{ "name": "", "type": "System.Int32" }] },
                    { "kind": "method", "name": "class" }
                ]
            }
        ]"#,
    );

    assert_eq!(metadata.types.len(), 1);
    let names: Vec<_> = metadata.types[0]
        .members
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"class"));
    assert!(names.contains(&"Stop"));
    assert!(metadata.diagnostics.has_errors());
    assert_eq!(
        messages(&metadata),
        [
            "error: Acme.List`1: `List`1` is not a valid identifier",
            "error: Acme.Widget.<Run>b__0: `<Run>b__0` is not a valid identifier",
            "error: Acme.Widget.Run: `2nd` is not a valid identifier",
        ]
    );
}

#[test]
fn interface_operators_must_be_abstract_or_virtual() {
    let metadata = read(
        r#"[{
            "namespace": "Acme",
            "name": "INumber",
            "kind": "interface",
            "members": [
                { "kind": "operator", "name": "op_Addition", "type": "Acme.INumber", "modifiers": ["static", "abstract"],
                  "parameters": [{ "name": "a", "type": "Acme.INumber" }, { "name": "b", "type": "Acme.INumber" }] },
                { "kind": "operator", "name": "op_Subtraction", "type": "Acme.INumber", "modifiers": ["static", "virtual"],
                  "parameters": [{ "name": "a", "type": "Acme.INumber" }, { "name": "b", "type": "Acme.INumber" }] },
                { "kind": "operator", "name": "op_Multiply", "type": "Acme.INumber", "modifiers": ["static"],
                  "parameters": [{ "name": "a", "type": "Acme.INumber" }, { "name": "b", "type": "Acme.INumber" }] }
            ]
        }]"#,
    );

    assert_eq!(metadata.types[0].members.len(), 2);
    assert_eq!(
        messages(&metadata),
        ["warning: Acme.INumber.op_Multiply: unsupported construct: interface operator is neither abstract nor virtual"]
    );
}

#[test]
fn non_finite_decimal_values_are_unsupported() {
    let source = descriptor_set(
        r#"[{
            "namespace": "Acme",
            "name": "Limits",
            "kind": "class",
            "members": [
                { "kind": "method", "name": "Clamp", "parameters": [{ "name": "max", "type": "System.Decimal", "default": 1.5 }] },
                { "kind": "method", "name": "Scale", "parameters": [{ "name": "factor", "type": "System.Double", "default": 1.5 }] },
                { "kind": "field", "name": "Top", "type": "System.Decimal", "modifiers": ["static", "const"], "constant": 1.5 },
                { "kind": "field", "name": "Bottom", "type": "System.Decimal", "modifiers": ["static", "const"], "constant": 0.5 }
            ]
        }]"#,
    );
    let mut types = DescriptorSet::from_json(&source).unwrap().types;
    for member in &mut types[0].members {
        match member.name.as_str() {
            "Clamp" => member.parameters[0].default = Some(Literal::Float(f64::NAN)),
            "Scale" => member.parameters[0].default = Some(Literal::Float(f64::INFINITY)),
            "Top" => member.constant = Some(Literal::Float(f64::NEG_INFINITY)),
            _ => {}
        }
    }

    let mut diagnostics = Diagnostics::new();
    let kept = filter::Filter::new(true, &mut diagnostics).types(types, "");

    let names: Vec<_> = kept[0].members.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"Scale"));
    assert!(names.contains(&"Bottom"));
    assert_eq!(names.len(), 2);
    let messages: Vec<_> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "warning: Acme.Limits.Clamp: unsupported construct: non-finite decimal value",
            "warning: Acme.Limits.Top: unsupported construct: non-finite decimal value",
        ]
    );
}
