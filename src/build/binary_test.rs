// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use std::fs;

use rstest::rstest;

use super::*;
use crate::context::BuildConfig;
use crate::header::{tags, Header, Value};
use crate::spec::SubPackageSpec;

fn context_for(root: &std::path::Path, out: &std::path::Path) -> BuildContext {
    let mut config = BuildConfig::default();
    config.root_prefix = Some(root.to_path_buf());
    config.output_dir = out.to_path_buf();
    // "cat" stands in for cpio/gzip so the test does not depend on
    // either being installed; see archive_test.rs.
    config.archiver_program = "cat".to_string();
    config.compressor_program = "cat".to_string();
    BuildContext::new(config)
}

fn primary_header() -> Header {
    Header::from_named_scalars([
        ("VERSION".to_string(), "1.0".to_string()),
        ("RELEASE".to_string(), "1".to_string()),
    ])
    .unwrap()
}

#[test]
fn one_regular_config_file_is_assembled() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("etc")).unwrap();
    fs::write(root.path().join("etc/foo.conf"), b"abcd").unwrap();

    let mut sub = SubPackageSpec::with_file_list("/etc/foo.conf %config");
    sub.header = primary_header();
    let spec = SpecHandle::new("foo", "foo.spec", vec![], vec![sub]);

    let mut ctx = context_for(root.path(), out.path());
    let outputs = build_binaries(&mut ctx, &spec).unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].to_string_lossy().ends_with(".rpm"));
    assert!(outputs[0].exists());
}

#[test]
fn sub_package_with_no_files_produces_no_output() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    let mut with_files = SubPackageSpec::with_file_list("/etc/foo.conf");
    with_files.header = primary_header();
    fs::write(root.path().join("dummy"), b"x").unwrap();
    with_files.file_list = "/dummy".to_string();

    let mut skipped = SubPackageSpec::with_file_list(crate::spec::NO_FILES);

    let spec = SpecHandle::new("foo", "foo.spec", vec![], vec![with_files, skipped]);
    let mut ctx = context_for(root.path(), out.path());
    let outputs = build_binaries(&mut ctx, &spec).unwrap();
    assert_eq!(outputs.len(), 1);
}

#[rstest]
#[case(b"GIF89a...".to_vec(), tags::GIF)]
#[case(b"/* XPM */".to_vec(), tags::XPM)]
#[case(b"\x89PNG\r\n".to_vec(), tags::ICON)]
fn icon_is_classified_by_leading_bytes(#[case] bytes: Vec<u8>, #[case] expected: crate::header::Tag) {
    let (tag, out) = sniff_icon(bytes.clone());
    assert_eq!(tag, expected);
    assert_eq!(out, bytes);
}

#[test]
fn icon_is_resolved_against_the_configured_source_directory() {
    let root = tempfile::tempdir().unwrap();
    let source_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(root.path().join("dummy"), b"x").unwrap();
    fs::write(source_dir.path().join("icon.gif"), b"GIF89a-icon-bytes").unwrap();

    let mut sub = SubPackageSpec::with_file_list("/dummy");
    sub.header = primary_header();
    sub.icon = Some(std::path::PathBuf::from("icon.gif"));
    let spec = SpecHandle::new("foo", "foo.spec", vec![], vec![sub]);

    let mut ctx = context_for(root.path(), out.path());
    ctx.config.source_dir = source_dir.path().to_path_buf();
    let outputs = build_binaries(&mut ctx, &spec).unwrap();
    assert_eq!(outputs.len(), 1);

    let bytes = fs::read(&outputs[0]).unwrap();
    let needle = b"GIF89a-icon-bytes";
    assert!(
        bytes.windows(needle.len()).any(|w| w == needle),
        "expected the icon bytes read from source_dir to be embedded in the output header"
    );
}

#[test]
fn icon_missing_from_source_dir_is_not_silently_read_from_elsewhere() {
    let root = tempfile::tempdir().unwrap();
    let source_dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(root.path().join("dummy"), b"x").unwrap();

    let mut sub = SubPackageSpec::with_file_list("/dummy");
    sub.header = primary_header();
    sub.icon = Some(std::path::PathBuf::from("icon.gif"));
    let spec = SpecHandle::new("foo", "foo.spec", vec![], vec![sub]);

    let mut ctx = context_for(root.path(), out.path());
    ctx.config.source_dir = source_dir.path().to_path_buf();
    let err = build_binaries(&mut ctx, &spec).unwrap_err();
    assert!(matches!(err, Error::IO(_)));
}

#[test]
fn script_hook_tags_are_never_copied_into_a_sub_package_that_lacks_them() {
    let mut primary = primary_header();
    primary
        .add(tags::PREIN, Value::Str("%pre script".to_string()))
        .unwrap();
    primary
        .add(tags::NAME, Value::Str("foo".to_string()))
        .unwrap();

    let merged = merge_primary_into(&primary, Header::new()).unwrap();
    assert!(!merged.contains(tags::PREIN));
    assert_eq!(merged.get(tags::NAME), Some(&Value::Str("foo".to_string())));
}

#[test]
fn a_sub_packages_own_script_hook_is_left_untouched() {
    let mut primary = primary_header();
    primary
        .add(tags::PREIN, Value::Str("primary pre".to_string()))
        .unwrap();

    let mut sub_header = Header::new();
    sub_header
        .add(tags::PREIN, Value::Str("sub pre".to_string()))
        .unwrap();

    let merged = merge_primary_into(&primary, sub_header).unwrap();
    assert_eq!(
        merged.get(tags::PREIN),
        Some(&Value::Str("sub pre".to_string()))
    );
}

#[test]
fn missing_version_tag_is_a_bad_spec_error() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let sub = SubPackageSpec::with_file_list("/dummy");
    let spec = SpecHandle::new("foo", "foo.spec", vec![], vec![sub]);
    let mut ctx = context_for(root.path(), out.path());
    let err = build_binaries(&mut ctx, &spec).unwrap_err();
    assert!(matches!(err, Error::BadSpec(msg) if msg.contains("version")));
}
