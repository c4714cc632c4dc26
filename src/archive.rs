// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The archive emitter: pipes a manifest's paths through an external
//! archiver and compressor, writing the compressed archive to a
//! caller-supplied sink.
//!
//! Built on `std::process::Command` with piped stdio rather than raw
//! `fork`/`pipe`/`dup2`/`exec`: no `unsafe`, and the program names are
//! configurable (`BuildConfig::archiver_program` /
//! `compressor_program`) rather than hardcoded.

use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::manifest::FileManifest;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    NonZeroExit { program: String, status: String },
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, ArchiveError>;

/// Pipe every path in `manifest` (already in canonical order) through
/// the configured archiver then compressor, writing the resulting
/// bytes to `output`.
///
/// `cwd` is the working directory the archiver runs in: the staging
/// directory when `staging` is true, else the caller's root-prefix
/// override (or `/`). When `staging` is true names are written as-is;
/// otherwise each name's single leading `/` is stripped so the archive
/// is root-relative. `verbose` selects `-ov` vs `-o` and `staging`
/// selects `-LH` vs `-H` for the archiver invocation.
pub fn emit_archive<W: Write>(
    manifest: &FileManifest,
    cwd: &Path,
    staging: bool,
    verbose: bool,
    archiver_program: &str,
    compressor_program: &str,
    output: &mut W,
) -> Result<()> {
    let out_flag = if verbose { "-ov" } else { "-o" };
    let follow_flag = if staging { "-LH" } else { "-H" };
    let mut archiver = spawn(
        archiver_program,
        &[out_flag, follow_flag, "crc"],
        cwd,
        Stdio::piped(),
    )?;
    let mut compressor = spawn(
        compressor_program,
        &["-c9fn"],
        cwd,
        Stdio::from(archiver.stdout.take().expect("archiver stdout was piped")),
    )?;

    let mut archiver_stdin = archiver.stdin.take().expect("archiver stdin was piped");
    let paths: Vec<String> = manifest
        .iter()
        .map(|r| {
            if staging {
                r.path.clone()
            } else {
                r.path.trim_start_matches('/').to_string()
            }
        })
        .collect();
    let writer = std::thread::spawn(move || -> std::io::Result<()> {
        for path in paths {
            writeln!(archiver_stdin, "{path}")?;
        }
        Ok(())
    });

    let mut compressor_stdout = compressor.stdout.take().expect("compressor stdout was piped");
    std::io::copy(&mut compressor_stdout, output)?;

    writer
        .join()
        .expect("archiver stdin writer thread panicked")?;

    wait_success(&mut archiver, archiver_program)?;
    wait_success(&mut compressor, compressor_program)?;
    Ok(())
}

fn spawn(program: &str, args: &[&str], cwd: &Path, stdin: Stdio) -> Result<Child> {
    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(stdin)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|source| ArchiveError::Spawn {
            program: program.to_string(),
            source,
        })
}

fn wait_success(child: &mut Child, program: &str) -> Result<()> {
    let status = child.wait()?;
    if !status.success() {
        return Err(ArchiveError::NonZeroExit {
            program: program.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "./archive_test.rs"]
mod archive_test;
