// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The source-package driver: stages symlinks to the spec file, every
//! declared source, and any sub-package icons, then assembles a single
//! `.src.rpm`-style archive from that staging directory.

use std::fs;
use std::io::Write;
use std::os::unix::fs::{symlink, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::archive::emit_archive;
use crate::context::BuildContext;
use crate::header::{tags, Header, Value};
use crate::lead::{LeadingRecord, PackageKind};
use crate::manifest::{expand_file_list, populate_file_columns, PackagingMode};
use crate::spec::SpecHandle;
use crate::{Error, Result};

const OUTPUT_MODE: u32 = 0o644;
const STAGING_MODE: u32 = 0o700;

/// Build the single source package for `spec`.
pub fn build_source(ctx: &mut BuildContext, spec: &SpecHandle) -> Result<PathBuf> {
    let primary = spec
        .primary_header()
        .cloned()
        .unwrap_or_else(Header::new);
    let version = string_tag(&primary, tags::VERSION)
        .ok_or_else(|| Error::BadSpec("no version field".to_string()))?;
    let release = string_tag(&primary, tags::RELEASE)
        .ok_or_else(|| Error::BadSpec("no release field".to_string()))?;

    let staging = tempfile::Builder::new()
        .prefix("pkgasm-src-")
        .tempdir_in(&ctx.config.tmp_dir)?;
    fs::set_permissions(staging.path(), fs::Permissions::from_mode(STAGING_MODE))?;

    let mut staged_names = Vec::new();

    let spec_name = file_name_of(&spec.spec_file)?;
    link_into(staging.path(), &spec.spec_file, &spec_name)?;
    staged_names.push(spec_name);

    for source in &spec.sources {
        let name = file_name_of(source)?;
        link_into(staging.path(), &ctx.config.source_dir.join(source), &name)?;
        staged_names.push(name);
    }

    for sub in &spec.sub_packages {
        if let Some(icon) = &sub.icon {
            let name = file_name_of(icon)?;
            link_into(staging.path(), &ctx.config.source_dir.join(icon), &name)?;
            staged_names.push(name);
        }
    }

    let output_name = format!("{}-{version}-{release}.src.rpm", spec.base_name);
    let output_path = ctx.config.output_dir.join(&output_name);
    info!(file = %output_name, sources = staged_names.len(), "assembling source package");

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(&output_path)?;

    let lead = LeadingRecord::new(
        PackageKind::Source,
        ctx.arch_os.arch_num(),
        ctx.arch_os.os_num(),
        output_name,
    );
    lead.write_to(&mut file)?;

    let mut header = primary;
    header.add(tags::OS, Value::Int8(vec![ctx.arch_os.os_num() as i8]))?;
    header.add(tags::ARCH, Value::Int8(vec![ctx.arch_os.arch_num() as i8]))?;
    header.add(tags::BUILDTIME, Value::Int32(vec![ctx.build_time() as i32]))?;
    header.add(
        tags::BUILDHOST,
        Value::Str(ctx.build_host().to_string()),
    )?;

    // The staging directory holds flat, basename-named symlinks;
    // expand the manifest against it directly rather than the
    // configured sources directory.
    let file_list = staged_names.join("\n");
    let saved_source_dir = std::mem::replace(
        &mut ctx.config.source_dir,
        staging.path().to_path_buf(),
    );
    let expansion = expand_file_list(ctx, &file_list, PackagingMode::Source);
    ctx.config.source_dir = saved_source_dir;
    let expansion = expansion?;

    let mut manifest = expansion.manifest;
    manifest.sort_descending();
    let total_size = manifest.total_size();
    populate_file_columns(&mut header, &manifest, staging.path())?;
    header.add(tags::SIZE, Value::Int32(vec![total_size as i32]))?;

    file.write_all(&header.to_bytes())?;

    emit_archive(
        &manifest,
        staging.path(),
        true,
        ctx.config.verbose,
        &ctx.config.archiver_program,
        &ctx.config.compressor_program,
        &mut file,
    )?;

    // `staging` is a `tempfile::TempDir`; it removes itself (and every
    // symlink inside it) on drop here.
    Ok(output_path)
}

fn string_tag(header: &Header, tag: crate::header::Tag) -> Option<String> {
    match header.get(tag) {
        Some(Value::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::BadSpec(format!("path has no file name: {}", path.display())))
}

fn link_into(staging_dir: &Path, source: &Path, name: &str) -> Result<()> {
    symlink(source, staging_dir.join(name))?;
    Ok(())
}

#[cfg(test)]
#[path = "./source_test.rs"]
mod source_test;
