// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use super::*;

fn record(path: &str) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        is_doc: false,
        is_conf: false,
        stat: FileStat {
            size: 0,
            uid: 0,
            gid: 0,
            mtime: 0,
            mode: 0o100644,
            rdev: 0,
        },
        link_target: None,
        owner: "root".to_string(),
        group: "root".to_string(),
    }
}

#[test]
fn sort_descending_reverses_lexical_order() {
    let mut manifest = FileManifest::new();
    manifest.push(record("/a"));
    manifest.push(record("/c"));
    manifest.push(record("/b"));
    manifest.sort_descending();
    let paths: Vec<&str> = manifest.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/c", "/b", "/a"]);
}

#[test]
fn total_size_sums_every_record() {
    let mut manifest = FileManifest::new();
    let mut a = record("/a");
    a.stat.size = 10;
    let mut b = record("/b");
    b.stat.size = 32;
    manifest.push(a);
    manifest.push(b);
    assert_eq!(manifest.total_size(), 42);
}

#[test]
fn empty_manifest_reports_zero_total_size() {
    let manifest = FileManifest::new();
    assert_eq!(manifest.total_size(), 0);
    assert!(manifest.is_empty());
}
