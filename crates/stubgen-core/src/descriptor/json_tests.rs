use super::*;

const SAMPLE_JSON: &str = r#"{
    "artifact": {
        "name": "Acme.Http",
        "version": "7.0.0.0",
        "culture": "neutral",
        "public_key_token": "adb9793829ddae60"
    },
    "types": [
        {
            "namespace": "Acme.Http.Features",
            "name": "FormFeature",
            "kind": "class",
            "interfaces": ["Acme.Http.Features.IFormFeature"],
            "members": [
                {
                    "kind": "constructor",
                    "parameters": [
                        { "name": "request", "type": "Acme.Http.HttpRequest" }
                    ]
                },
                {
                    "kind": "property",
                    "name": "HasFormContentType",
                    "type": "System.Boolean",
                    "accessors": ["get"]
                },
                {
                    "kind": "method",
                    "name": "ReadFormAsync",
                    "type": {
                        "kind": "named",
                        "name": "System.Threading.Tasks.Task",
                        "args": ["Acme.Http.IFormCollection"]
                    },
                    "parameters": [
                        {
                            "name": "cancellationToken",
                            "type": "System.Threading.CancellationToken",
                            "default": { "kind": "default" }
                        }
                    ]
                }
            ],
            "nested_types": [
                {
                    "name": "Enumerator",
                    "kind": "struct",
                    "members": [
                        { "kind": "method", "name": "MoveNext", "type": "System.Boolean" }
                    ]
                }
            ]
        },
        {
            "namespace": ["Acme", "Http"],
            "name": "Helper",
            "kind": "class",
            "accessibility": "internal",
            "modifiers": ["static"]
        }
    ]
}"#;

#[test]
fn parse_sample_set() {
    let set = DescriptorSet::from_json(SAMPLE_JSON).unwrap();
    assert_eq!(set.artifact.name, "Acme.Http");
    assert_eq!(set.artifact.public_key_token(), "adb9793829ddae60");
    assert_eq!(set.types.len(), 2);

    let feature = &set.types[0];
    assert_eq!(feature.namespace, ["Acme", "Http", "Features"]);
    assert_eq!(feature.kind, TypeKind::Class);
    assert_eq!(feature.accessibility, Accessibility::Public);
    assert_eq!(feature.members.len(), 3);
    assert_eq!(
        feature.interfaces,
        [TypeRef::named("Acme.Http.Features.IFormFeature")]
    );

    let helper = &set.types[1];
    assert_eq!(helper.namespace, ["Acme", "Http"]);
    assert_eq!(helper.accessibility, Accessibility::Internal);
    assert!(helper.has(TypeModifier::Static));
}

#[test]
fn owners_and_nesting_are_resolved() {
    let set = DescriptorSet::from_json(SAMPLE_JSON).unwrap();
    let feature = &set.types[0];
    assert!(
        feature
            .members
            .iter()
            .all(|m| m.owner == "Acme.Http.Features.FormFeature")
    );

    let enumerator = &feature.nested_types[0];
    assert_eq!(enumerator.namespace, ["Acme", "Http", "Features"]);
    assert_eq!(enumerator.declaring, ["FormFeature"]);
    assert_eq!(
        enumerator.qualified_name(),
        "Acme.Http.Features.FormFeature.Enumerator"
    );
    assert_eq!(
        enumerator.members[0].owner,
        "Acme.Http.Features.FormFeature.Enumerator"
    );
    assert_eq!(feature.type_count(), 2);
    assert_eq!(feature.member_count(), 4);
}

#[test]
fn type_ref_shorthand_and_tagged_forms() {
    let set = DescriptorSet::from_json(SAMPLE_JSON).unwrap();
    let read = &set.types[0].members[2];
    assert_eq!(
        read.ty,
        Some(TypeRef::generic(
            "System.Threading.Tasks.Task",
            vec![TypeRef::named("Acme.Http.IFormCollection")]
        ))
    );
    assert_eq!(read.parameters[0].default, Some(Literal::Default));
}

#[test]
fn parse_literals() {
    let json = r#"{
        "artifact": { "name": "Lits" },
        "types": [{
            "name": "Values",
            "kind": "class",
            "members": [{
                "kind": "method",
                "name": "M",
                "parameters": [
                    { "name": "a", "type": "System.Int32", "default": 5 },
                    { "name": "b", "type": "System.Double", "default": 1.5 },
                    { "name": "c", "type": "System.String", "default": "hi" },
                    { "name": "d", "type": "System.Boolean", "default": true },
                    { "name": "e", "type": "System.Char", "default": { "kind": "char", "value": "x" } },
                    { "name": "f", "type": "System.Object", "default": { "kind": "null" } },
                    { "name": "g", "type": "System.UInt64", "default": { "kind": "uint", "value": 18446744073709551615 } },
                    { "name": "h", "type": "System.Object", "default": null }
                ]
            }]
        }]
    }"#;

    let set = DescriptorSet::from_json(json).unwrap();
    let defaults: Vec<_> = set.types[0].members[0]
        .parameters
        .iter()
        .map(|p| p.default.clone())
        .collect();
    assert_eq!(
        defaults,
        [
            Some(Literal::Int(5)),
            Some(Literal::Float(1.5)),
            Some(Literal::String("hi".to_string())),
            Some(Literal::Bool(true)),
            Some(Literal::Char('x')),
            Some(Literal::Null),
            Some(Literal::UInt(u64::MAX)),
            None,
        ]
    );
    assert_eq!(set.artifact.version, "0.0.0.0");
    assert!(set.types[0].namespace.is_empty());
}

#[test]
fn parse_generics_and_constraints() {
    let json = r#"{
        "artifact": { "name": "Gen" },
        "types": [{
            "namespace": "Gen",
            "name": "Pool",
            "kind": "interface",
            "generic_params": [{
                "name": "T",
                "variance": "out",
                "constraints": [
                    { "kind": "new" },
                    { "kind": "class" },
                    { "kind": "type", "type": "System.IDisposable" },
                    { "kind": "notnull" }
                ]
            }],
            "members": [{
                "kind": "property",
                "name": "Items",
                "type": { "kind": "array", "element": { "kind": "generic_param", "name": "T" } },
                "accessors": ["set", "get"]
            }]
        }]
    }"#;

    let set = DescriptorSet::from_json(json).unwrap();
    let pool = &set.types[0];
    let param = &pool.generic_params[0];
    assert_eq!(param.variance, Some(Variance::Out));
    assert_eq!(
        param.constraints,
        [
            Constraint::New,
            Constraint::Class,
            Constraint::Type(TypeRef::named("System.IDisposable")),
            Constraint::NotNull,
        ]
    );
    let items = &pool.members[0];
    assert_eq!(
        items.ty,
        Some(TypeRef::array(TypeRef::GenericParam("T".to_string())))
    );
    let accessors: Vec<_> = items.accessors.iter().copied().collect();
    assert_eq!(accessors, [Accessor::Get, Accessor::Set]);
}

#[test]
fn unknown_kinds_are_kept_for_the_reader() {
    let json = r#"{
        "artifact": { "name": "Odd" },
        "types": [{
            "name": "Thing",
            "kind": "record",
            "members": [
                { "kind": "finalizer", "name": "Finalize" },
                { "kind": "field", "name": "Ptr", "type": { "kind": "pointer", "pointee": "System.Byte" } },
                { "kind": "field", "name": "Fn", "type": { "kind": "function_pointer" } },
                { "kind": "field", "name": "Mystery", "type": { "kind": "modopt" } }
            ]
        }]
    }"#;

    let set = DescriptorSet::from_json(json).unwrap();
    let thing = &set.types[0];
    assert_eq!(thing.kind, TypeKind::Unknown);
    assert_eq!(thing.members[0].kind, MemberKind::Unknown);
    assert_eq!(
        thing.members[1].ty,
        Some(TypeRef::Pointer(Box::new(TypeRef::named("System.Byte"))))
    );
    assert_eq!(thing.members[2].ty, Some(TypeRef::FunctionPointer));
    assert_eq!(thing.members[3].ty, Some(TypeRef::Unknown));
}

#[test]
fn syntax_errors_report_position() {
    let err = DescriptorSet::from_json("{\n  \"artifact\": {\n    \"name\": 12\n  }\n}").unwrap_err();
    assert_eq!(err.line(), 3);
    assert!(err.to_string().starts_with("JSON parse error:"));
}

#[test]
fn truncated_input_is_eof() {
    let err = DescriptorSet::from_json("{ \"artifact\": ").unwrap_err();
    assert!(err.is_eof());
}
