use std::path::PathBuf;

use super::printer::{byte_offset, char_span};
use super::*;
use crate::{Error, MetadataCause};

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedConstruct, "Acme.Buffer.Ptr")
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    assert_eq!(
        diagnostics.render(),
        "warning: Acme.Buffer.Ptr: unsupported construct\n"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedConstruct, "Acme.Buffer.Ptr")
        .message("pointer type")
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateMember, "Acme.Buffer")
        .message("Read(int)")
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateType, "Acme")
        .message("Acme.Buffer")
        .emit();

    assert_eq!(diagnostics.warning_count(), 3);
    assert_eq!(diagnostics.count_of(DiagnosticKind::DuplicateMember), 1);
    let lines: Vec<_> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "warning: Acme.Buffer.Ptr: unsupported construct: pointer type",
            "warning: Acme.Buffer: duplicate member signature `Read(int)`",
            "warning: Acme: `Acme.Buffer` is declared more than once",
        ]
    );
}

#[test]
fn invalid_names_are_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidName, "Acme.Widget")
        .message("<Run>b__0")
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateType, "Acme")
        .message("Widget")
        .emit();

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(
        diagnostics.render(),
        "error: Acme.Widget: `<Run>b__0` is not a valid identifier\n\
         warning: Acme: `Widget` is declared more than once\n"
    );
}

#[test]
fn printer_prefixes_artifact() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateType, "Acme")
        .message("Acme.Buffer")
        .emit();

    let out = diagnostics.printer().artifact("Acme.IO").render();
    assert_eq!(
        out,
        "[Acme.IO] warning: Acme: `Acme.Buffer` is declared more than once\n"
    );
}

#[test]
fn extend_merges_messages() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::DuplicateType, "X").emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::DuplicateMember, "Y").emit();
    a.extend(b);
    assert_eq!(a.len(), 2);
}

#[test]
fn offsets_follow_lines() {
    let src = "ab\ncd\nef";
    assert_eq!(byte_offset(src, 1, 1), 0);
    assert_eq!(byte_offset(src, 2, 2), 4);
    assert_eq!(byte_offset(src, 3, 1), 6);
    assert_eq!(byte_offset(src, 9, 1), src.len());
    assert_eq!(byte_offset(src, 3, 40), src.len());
}

#[test]
fn malformed_metadata_renders_snippet() {
    let source_text = "{\n  \"artifact\": {\n    \"name\": 12\n  }\n}".to_string();
    let error = stubgen_core::parse_descriptor_set(&source_text).unwrap_err();
    let err = Error::MetadataUnavailable {
        path: PathBuf::from("broken.json"),
        cause: MetadataCause::Malformed { error, source_text },
    };

    let out = render_error(&err, false);
    assert!(out.contains("malformed descriptor set `broken.json`"));
    assert!(out.contains("broken.json:3:"));
    assert!(out.contains("\"name\": 12"));
}

#[test]
fn spans_cover_whole_characters() {
    let src = "{\"a\": é}";
    let e = src.find('é').unwrap();
    assert_eq!(char_span(src, e), e..e + 2);
    assert_eq!(char_span(src, e + 1), e..e + 2);
    assert_eq!(char_span(src, 0), 0..1);
    assert_eq!(char_span(src, src.len()), src.len()..src.len());
    assert_eq!(char_span(src, src.len() + 5), src.len()..src.len());
}

#[test]
fn malformed_metadata_with_multibyte_char_at_error() {
    let err = crate::MetadataReader::default()
        .from_source("{\"artifact\": é}", std::path::Path::new("accent.json"))
        .unwrap_err();

    let out = render_error(&err, false);
    assert!(out.contains("malformed descriptor set `accent.json`"));
    assert!(out.contains("é"));

    let wide = crate::MetadataReader::default()
        .from_source("{\n  \"artifact\": 名前\n}", std::path::Path::new("wide.json"))
        .unwrap_err();
    assert!(render_error(&wide, true).contains("wide.json"));
}

#[test]
fn other_errors_render_single_line() {
    let err = Error::MetadataUnavailable {
        path: PathBuf::from("missing.json"),
        cause: MetadataCause::NotFound,
    };
    assert_eq!(
        render_error(&err, false),
        "error: metadata unavailable for missing.json: file not found"
    );
}
