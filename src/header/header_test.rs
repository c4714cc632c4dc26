// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use super::*;

#[test]
fn add_rejects_duplicate_tags() {
    let mut header = Header::new();
    header.add(tags::SIZE, Value::Int32(vec![4])).unwrap();
    let err = header.add(tags::SIZE, Value::Int32(vec![5])).unwrap_err();
    assert!(matches!(err, HeaderError::DuplicateTag(t) if t == tags::SIZE));
}

#[test]
fn iteration_preserves_insertion_order() {
    let mut header = Header::new();
    header.add(tags::NAME, Value::Str("foo".into())).unwrap();
    header.add(tags::VERSION, Value::Str("1.0".into())).unwrap();
    let seen: Vec<Tag> = header.iter().map(|(t, _)| t).collect();
    assert_eq!(seen, vec![tags::NAME, tags::VERSION]);
}

#[test]
fn empty_header_serializes_to_just_a_count() {
    let header = Header::new();
    assert_eq!(header.to_bytes(), 0u32.to_be_bytes().to_vec());
}

#[test]
fn serializes_string_array_with_lengths_and_counts() {
    let mut header = Header::new();
    header
        .add(
            tags::FILENAMES,
            Value::StrArray(vec!["/b".to_string(), "/a".to_string()]),
        )
        .unwrap();
    let bytes = header.to_bytes();

    let mut expected = Vec::new();
    expected.extend_from_slice(&1u32.to_be_bytes()); // entry count
    expected.extend_from_slice(&tags::FILENAMES.0.to_be_bytes());
    expected.extend_from_slice(&1u32.to_be_bytes()); // type code: StrArray
    expected.extend_from_slice(&2u32.to_be_bytes()); // element count
    expected.extend_from_slice(&2u32.to_be_bytes());
    expected.extend_from_slice(b"/b");
    expected.extend_from_slice(&2u32.to_be_bytes());
    expected.extend_from_slice(b"/a");

    assert_eq!(bytes, expected);
}

#[test]
fn from_named_scalars_resolves_canonical_tag_names() {
    let header = Header::from_named_scalars([
        ("VERSION".to_string(), "1.0".to_string()),
        ("RELEASE".to_string(), "1".to_string()),
    ])
    .unwrap();
    assert_eq!(header.get(tags::VERSION), Some(&Value::Str("1.0".into())));
    assert_eq!(header.get(tags::RELEASE), Some(&Value::Str("1".into())));
}

#[test]
fn from_named_scalars_rejects_unknown_names() {
    let err = Header::from_named_scalars([("NOT_A_TAG".to_string(), "x".to_string())])
        .unwrap_err();
    assert!(matches!(err, HeaderError::UnknownTag(_)));
}

#[test]
fn clone_is_a_deep_copy() {
    let mut header = Header::new();
    header.add(tags::NAME, Value::Str("foo".into())).unwrap();
    let mut copy = header.clone();
    copy.add(tags::VERSION, Value::Str("1.0".into())).unwrap();
    assert_eq!(header.len(), 1);
    assert_eq!(copy.len(), 2);
}
