// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The binary-package driver: one output file per sub-package that
//! declares files, assembled from the primary header merged with the
//! sub-package's own, plus that sub-package's expanded file manifest.

use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

use tracing::info;

use crate::archive::emit_archive;
use crate::context::BuildContext;
use crate::header::{tags, Header, Value};
use crate::lead::{LeadingRecord, PackageKind};
use crate::manifest::{expand_file_list, populate_file_columns, PackagingMode};
use crate::spec::{SpecHandle, SubPackageSpec};
use crate::{Error, Result};

const OUTPUT_MODE: u32 = 0o644;

/// Build one binary package per sub-package that declares files.
/// Sub-packages whose file list is the "no files" sentinel are
/// skipped entirely and produce no output.
pub fn build_binaries(ctx: &mut BuildContext, spec: &SpecHandle) -> Result<Vec<PathBuf>> {
    let primary = spec
        .primary_header()
        .cloned()
        .unwrap_or_else(Header::new);
    let version = string_tag(&primary, tags::VERSION)
        .ok_or_else(|| Error::BadSpec("no version field".to_string()))?;
    let release = string_tag(&primary, tags::RELEASE)
        .ok_or_else(|| Error::BadSpec("no release field".to_string()))?;

    let mut outputs = Vec::new();
    for sub in &spec.sub_packages {
        if !sub.has_files() {
            continue;
        }
        let path = build_one(ctx, spec, &primary, &version, &release, sub)?;
        outputs.push(path);
    }
    Ok(outputs)
}

fn build_one(
    ctx: &mut BuildContext,
    spec: &SpecHandle,
    primary: &Header,
    version: &str,
    release: &str,
    sub: &SubPackageSpec,
) -> Result<PathBuf> {
    let base = sub
        .name_override
        .clone()
        .unwrap_or_else(|| match &sub.name_suffix {
            Some(suffix) => format!("{}-{suffix}", spec.base_name),
            None => spec.base_name.clone(),
        });
    let output_name = format!("{base}-{version}-{release}");

    let mut header = merge_primary_into(primary, sub.header.clone())?;

    let expansion = expand_file_list(ctx, &sub.file_list, PackagingMode::Binary)?;
    let mut manifest = expansion.manifest;
    manifest.sort_descending();
    let total_size = manifest.total_size();

    let base_dir = ctx.resolve_on_disk("/");
    populate_file_columns(&mut header, &manifest, &base_dir)?;

    header.add(tags::OS, Value::Int8(vec![ctx.arch_os.os_num() as i8]))?;
    header.add(tags::ARCH, Value::Int8(vec![ctx.arch_os.arch_num() as i8]))?;
    header.add(tags::BUILDTIME, Value::Int32(vec![ctx.build_time() as i32]))?;
    header.add(tags::SIZE, Value::Int32(vec![total_size as i32]))?;
    header.add(
        tags::BUILDHOST,
        Value::Str(ctx.build_host().to_string()),
    )?;

    if let Some(icon_path) = &sub.icon {
        let bytes = std::fs::read(ctx.config.source_dir.join(icon_path))?;
        let (tag, bytes) = sniff_icon(bytes);
        header.add(tag, Value::Bin(bytes))?;
    }

    let file_name = format!("{output_name}.{}.rpm", ctx.arch_os.arch_name());
    let output_path = ctx.config.output_dir.join(&file_name);
    info!(file = %file_name, files = manifest.len(), "assembling binary package");

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(&output_path)?;

    let lead = LeadingRecord::new(
        PackageKind::Binary,
        ctx.arch_os.arch_num(),
        ctx.arch_os.os_num(),
        output_name,
    );
    lead.write_to(&mut file)?;
    file.write_all(&header.to_bytes())?;

    emit_archive(
        &manifest,
        &base_dir,
        false,
        ctx.config.verbose,
        &ctx.config.archiver_program,
        &ctx.config.compressor_program,
        &mut file,
    )?;

    Ok(output_path)
}

/// Merge the primary header's entries into a sub-package's own header:
/// an entry is copied forward only if the sub-package header doesn't
/// already define that tag, and script-hook tags are never copied
/// forward at all (a sub-package without its own hooks gets none).
fn merge_primary_into(primary: &Header, mut sub_header: Header) -> Result<Header> {
    for (tag, value) in primary.iter() {
        if sub_header.contains(tag) || tags::SCRIPT_HOOKS.contains(&tag) {
            continue;
        }
        sub_header.add(tag, value.clone())?;
    }
    Ok(sub_header)
}

fn string_tag(header: &Header, tag: crate::header::Tag) -> Option<String> {
    match header.get(tag) {
        Some(Value::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Classify an icon's content by sniffing its leading bytes.
fn sniff_icon(bytes: Vec<u8>) -> (crate::header::Tag, Vec<u8>) {
    if bytes.starts_with(b"GIF") {
        (tags::GIF, bytes)
    } else if bytes.starts_with(b"/* XPM") {
        (tags::XPM, bytes)
    } else {
        (tags::ICON, bytes)
    }
}

#[cfg(test)]
#[path = "./binary_test.rs"]
mod binary_test;
