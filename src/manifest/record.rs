// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! [`FileRecord`]: the immutable per-file snapshot produced by
//! manifest expansion, plus the canonical descending-path sort the
//! manifest is always stored under.

/// The subset of `lstat(2)` fields the header population step needs.
/// Captured once, at manifest-expansion time, and never refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: i64,
    pub uid: u32,
    pub gid: u32,
    pub mtime: i64,
    pub mode: u32,
    pub rdev: u64,
}

/// One entry produced by the manifest expander: a path plus the
/// metadata snapshot needed to populate the output header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub is_doc: bool,
    pub is_conf: bool,
    pub stat: FileStat,
    pub link_target: Option<String>,
    pub owner: String,
    pub group: String,
}

/// An ordered collection of [`FileRecord`]s, always held in the
/// canonical descending-path order the archive emitter and header
/// populator both depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileManifest {
    records: Vec<FileRecord>,
}

impl FileManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = FileRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    pub fn total_size(&self) -> i64 {
        self.records.iter().map(|r| r.stat.size).sum()
    }

    /// Sort into the canonical order: descending by full path, exactly
    /// the reverse of byte-wise string order. Both the archive emitter
    /// and the file-manifest header columns assume this has already
    /// been applied.
    pub fn sort_descending(&mut self) {
        self.records.sort_by(|a, b| b.path.cmp(&a.path));
    }

    pub fn into_vec(self) -> Vec<FileRecord> {
        self.records
    }
}

impl FromIterator<FileRecord> for FileManifest {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let mut manifest = Self::new();
        manifest.extend(iter);
        manifest
    }
}

#[cfg(test)]
#[path = "./record_test.rs"]
mod record_test;
