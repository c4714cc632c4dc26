// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Writes the twelve parallel file-manifest columns into a [`Header`],
//! one array entry per [`FileRecord`] in canonical order.

use std::path::Path;

use data_encoding::HEXLOWER;
use md5::{Digest, Md5};

use crate::header::{tags, Header, Value};
use crate::Result;

use super::record::FileManifest;

/// File is marked `%config`.
const FLAG_CONFIG: i32 = 1 << 0;
/// File is marked `%doc`, or falls under a registered doc directory.
const FLAG_DOC: i32 = 1 << 1;

/// Populate the FILE* array tags on `header` from `manifest`, which
/// must already be in canonical descending-path order. `base_dir` is
/// where each record's path resolves to on disk for MD5 hashing: the
/// root-prefix override for a binary package, the source directory
/// for a source package.
pub fn populate_file_columns(
    header: &mut Header,
    manifest: &FileManifest,
    base_dir: &Path,
) -> Result<()> {
    if manifest.is_empty() {
        return Ok(());
    }

    let mut names = Vec::with_capacity(manifest.len());
    let mut sizes = Vec::with_capacity(manifest.len());
    let mut modes = Vec::with_capacity(manifest.len());
    let mut rdevs = Vec::with_capacity(manifest.len());
    let mut mtimes = Vec::with_capacity(manifest.len());
    let mut md5s = Vec::with_capacity(manifest.len());
    let mut linktos = Vec::with_capacity(manifest.len());
    let mut flags = Vec::with_capacity(manifest.len());
    let mut usernames = Vec::with_capacity(manifest.len());
    let mut groupnames = Vec::with_capacity(manifest.len());
    let mut uids = Vec::with_capacity(manifest.len());
    let mut gids = Vec::with_capacity(manifest.len());

    for record in manifest.iter() {
        names.push(record.path.clone());
        sizes.push(record.stat.size as i32);
        modes.push(record.stat.mode as i16);
        rdevs.push(record.stat.rdev as i16);
        mtimes.push(record.stat.mtime as i32);
        md5s.push(md5_digest(base_dir, record)?);
        linktos.push(record.link_target.clone().unwrap_or_default());

        let mut flag = 0;
        if record.is_conf {
            flag |= FLAG_CONFIG;
        }
        if record.is_doc {
            flag |= FLAG_DOC;
        }
        flags.push(flag);

        usernames.push(record.owner.clone());
        groupnames.push(record.group.clone());
        uids.push(record.stat.uid as i32);
        gids.push(record.stat.gid as i32);
    }

    header.add(tags::FILENAMES, Value::StrArray(names))?;
    header.add(tags::FILESIZES, Value::Int32(sizes))?;
    header.add(tags::FILEMODES, Value::Int16(modes))?;
    header.add(tags::FILERDEVS, Value::Int16(rdevs))?;
    header.add(tags::FILEMTIMES, Value::Int32(mtimes))?;
    header.add(tags::FILEMD5S, Value::StrArray(md5s))?;
    header.add(tags::FILELINKTOS, Value::StrArray(linktos))?;
    header.add(tags::FILEFLAGS, Value::Int32(flags))?;
    header.add(tags::FILEUSERNAME, Value::StrArray(usernames))?;
    header.add(tags::FILEGROUPNAME, Value::StrArray(groupnames))?;
    header.add(tags::FILEUIDS, Value::Int32(uids))?;
    header.add(tags::FILEGIDS, Value::Int32(gids))?;

    Ok(())
}

/// MD5 digest of a regular file's content, hex-encoded. Directories,
/// symlinks, and anything else without ordinary content get an empty
/// digest — only regular files are hashed.
fn md5_digest(base_dir: &Path, record: &super::record::FileRecord) -> Result<String> {
    const S_IFMT: u32 = 0o170000;
    const S_IFREG: u32 = 0o100000;
    if record.stat.mode & S_IFMT != S_IFREG {
        return Ok(String::new());
    }

    let mut on_disk = base_dir.to_path_buf();
    on_disk.push(record.path.trim_start_matches('/'));
    let contents = std::fs::read(&on_disk)?;
    let mut hasher = Md5::new();
    hasher.update(&contents);
    Ok(HEXLOWER.encode(&hasher.finalize()))
}

#[cfg(test)]
#[path = "./populate_test.rs"]
mod populate_test;
