// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The manifest expander: turns a package's declarative file-list text
//! into a [`FileManifest`] of concrete [`FileRecord`]s. This is the
//! largest single component of the assembler, walking each listed
//! path (recursing into directories) and applying the directives that
//! modify how an entry is recorded.

use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::context::BuildContext;
use crate::{Error, Result};

use super::docdir::DocDirRegistry;
use super::record::{FileManifest, FileRecord, FileStat};

/// Which packaging mode a file list is being expanded for. The two
/// modes differ in traversal, directive handling, and path semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingMode {
    Binary,
    Source,
}

/// Result of expanding one file-list text: the records produced plus
/// the doc-dir registry accumulated while doing so (the binary header
/// populator needs both).
pub struct Expansion {
    pub manifest: FileManifest,
    pub docdirs: DocDirRegistry,
}

/// Expand a file-list body into a [`FileManifest`].
///
/// A fresh [`DocDirRegistry`] is seeded with its defaults at the start
/// of every call, so each file-list pass starts from the same default
/// doc-directory set.
pub fn expand_file_list(
    ctx: &mut BuildContext,
    file_list: &str,
    mode: PackagingMode,
) -> Result<Expansion> {
    let mut docdirs = DocDirRegistry::default();
    let mut manifest = FileManifest::new();

    for line in file_list.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let mut is_doc = false;
        let mut is_conf = false;
        let mut is_dir = false;
        let mut filename: Option<&str> = None;
        let mut docdir_consumed = false;

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                "%doc" => is_doc = true,
                "%config" => is_conf = true,
                "%dir" => is_dir = true,
                "%docdir" => {
                    if let Some(dir) = tokens.get(i + 1) {
                        docdirs.add(*dir);
                    }
                    // A %docdir line never names a file; the rest of
                    // the line, if any, is not interpreted.
                    docdir_consumed = true;
                    break;
                }
                other => filename = Some(other),
            }
            i += 1;
        }

        if docdir_consumed {
            continue;
        }
        let Some(filename) = filename else {
            // No file path and no %docdir: the line contributes nothing.
            continue;
        };

        let added = match mode {
            PackagingMode::Binary => {
                add_binary_file(ctx, &mut docdirs, filename, is_doc, is_conf, is_dir)?
            }
            PackagingMode::Source => add_source_file(ctx, filename)?,
        };

        if added.is_empty() {
            return Err(Error::BadSpec(format!("file not found: {filename}")));
        }
        manifest.extend(added);
    }

    Ok(Expansion { manifest, docdirs })
}

fn add_binary_file(
    ctx: &mut BuildContext,
    docdirs: &mut DocDirRegistry,
    filename: &str,
    is_doc: bool,
    is_conf: bool,
    is_dir: bool,
) -> Result<Vec<FileRecord>> {
    if !filename.starts_with('/') {
        return Err(Error::BadSpec(format!(
            "file path must be absolute: {filename}"
        )));
    }

    let on_disk = ctx.resolve_on_disk(filename);
    let meta = match std::fs::symlink_metadata(&on_disk) {
        Ok(meta) => meta,
        Err(_) => return Ok(Vec::new()),
    };

    if meta.is_dir() && !is_dir {
        return descend(ctx, docdirs, &on_disk, is_doc, is_conf);
    }

    let record = build_record(ctx, docdirs, filename, &on_disk, &meta, is_doc, is_conf)?;
    Ok(vec![record])
}

/// Recurse into a directory named without `%dir`, producing one record
/// for the directory itself and one for every entry beneath it.
fn descend(
    ctx: &mut BuildContext,
    docdirs: &mut DocDirRegistry,
    root_on_disk: &Path,
    is_doc: bool,
    is_conf: bool,
) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();
    for entry in walkdir::WalkDir::new(root_on_disk).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::BadSpec(format!(
                "error walking {}: {e}",
                root_on_disk.display()
            ))
        })?;
        let on_disk = entry.path();
        let meta = std::fs::symlink_metadata(on_disk)?;
        let stored_path = ctx.strip_root(on_disk).to_string_lossy().into_owned();
        let stored_path = if stored_path.starts_with('/') {
            stored_path
        } else {
            format!("/{stored_path}")
        };
        records.push(build_record(
            ctx,
            docdirs,
            &stored_path,
            on_disk,
            &meta,
            is_doc,
            is_conf,
        )?);
    }
    Ok(records)
}

fn build_record(
    ctx: &mut BuildContext,
    docdirs: &mut DocDirRegistry,
    stored_path: &str,
    on_disk: &Path,
    meta: &Metadata,
    is_doc: bool,
    is_conf: bool,
) -> Result<FileRecord> {
    let link_target = if meta.file_type().is_symlink() {
        Some(
            std::fs::read_link(on_disk)?
                .to_string_lossy()
                .into_owned(),
        )
    } else {
        None
    };

    let owner = ctx.identity.user_name(meta.uid()).to_string();
    let group = ctx.identity.group_name(meta.gid()).to_string();

    Ok(FileRecord {
        path: stored_path.to_string(),
        is_doc: is_doc || docdirs.is_doc(stored_path),
        is_conf,
        stat: FileStat {
            size: meta.size() as i64,
            uid: meta.uid(),
            gid: meta.gid(),
            mtime: meta.mtime(),
            mode: meta.mode(),
            rdev: meta.rdev(),
        },
        link_target,
        owner,
        group,
    })
}

/// Source-package file lists are far simpler: `stat` (not `lstat`),
/// the path taken verbatim, and no recursion. Every source entry is
/// recorded with `isdoc`/`isconf` false regardless of what directives
/// were parsed on the line.
fn add_source_file(ctx: &mut BuildContext, filename: &str) -> Result<Vec<FileRecord>> {
    let on_disk = ctx.config.source_dir.join(filename);
    let meta = match std::fs::metadata(&on_disk) {
        Ok(meta) => meta,
        Err(_) => return Ok(Vec::new()),
    };

    let owner = ctx.identity.user_name(meta.uid()).to_string();
    let group = ctx.identity.group_name(meta.gid()).to_string();

    Ok(vec![FileRecord {
        path: filename.to_string(),
        is_doc: false,
        is_conf: false,
        stat: FileStat {
            size: meta.size() as i64,
            uid: meta.uid(),
            gid: meta.gid(),
            mtime: meta.mtime(),
            mode: meta.mode(),
            rdev: meta.rdev(),
        },
        link_target: None,
        owner,
        group,
    }])
}

#[cfg(test)]
#[path = "./expand_test.rs"]
mod expand_test;
