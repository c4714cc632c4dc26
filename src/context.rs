// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Per-build-session state: the identity caches, build time, build
//! host, and directory configuration a build needs, passed explicitly
//! into the drivers rather than kept as ambient process-wide globals.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archos::{ArchOsLookup, HostArchOsLookup};
use crate::manifest::identity::IdentityCache;
use crate::Result;

/// Configuration for a build session, loadable from the environment.
///
/// Values come from `PKGASM_*` environment variables via the `config`
/// crate.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Overrides where on disk packaged files are found.
    pub root_prefix: Option<PathBuf>,
    /// Directory holding declared source archives.
    pub source_dir: PathBuf,
    /// Parent directory for source-package staging dirs.
    pub tmp_dir: PathBuf,
    /// Directory output packages are written into.
    pub output_dir: PathBuf,
    pub verbose: bool,
    pub archiver_program: String,
    pub compressor_program: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_prefix: None,
            source_dir: PathBuf::from("."),
            tmp_dir: std::env::temp_dir(),
            output_dir: PathBuf::from("."),
            verbose: false,
            archiver_program: "cpio".to_string(),
            compressor_program: "gzip".to_string(),
        }
    }
}

impl BuildConfig {
    /// Load configuration, applying any `PKGASM_*` environment overrides
    /// on top of the defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let source = config::Config::builder()
            .set_default("root_prefix", None::<String>)?
            .set_default("source_dir", defaults.source_dir.to_string_lossy().to_string())?
            .set_default("tmp_dir", defaults.tmp_dir.to_string_lossy().to_string())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("verbose", defaults.verbose)?
            .set_default("archiver_program", defaults.archiver_program.clone())?
            .set_default("compressor_program", defaults.compressor_program.clone())?
            .add_source(config::Environment::with_prefix("PKGASM"))
            .build()?;

        Ok(Self {
            root_prefix: source
                .get_string("root_prefix")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            source_dir: PathBuf::from(source.get_string("source_dir")?),
            tmp_dir: PathBuf::from(source.get_string("tmp_dir")?),
            output_dir: PathBuf::from(source.get_string("output_dir")?),
            verbose: source.get_bool("verbose").unwrap_or(false),
            archiver_program: source.get_string("archiver_program")?,
            compressor_program: source.get_string("compressor_program")?,
        })
    }
}

/// Session-scoped state shared by every driver invoked in one process:
/// identity caches, the cached build host, and the build time captured
/// once at process start.
pub struct BuildContext {
    pub config: BuildConfig,
    pub identity: IdentityCache,
    pub arch_os: Arc<dyn ArchOsLookup + Send + Sync>,
    build_time: i64,
    build_host: Option<String>,
}

impl BuildContext {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            identity: IdentityCache::default(),
            arch_os: Arc::new(HostArchOsLookup),
            build_time: 0,
            build_host: None,
        }
    }

    /// Mark the build time for this process. If never called, the
    /// BUILDTIME tag stays zero.
    pub fn mark_build_time(&mut self, timestamp: i64) {
        self.build_time = timestamp;
    }

    pub fn build_time(&self) -> i64 {
        self.build_time
    }

    /// Resolve and cache the build host name; resolves once and
    /// freezes the result for the rest of the process.
    pub fn build_host(&mut self) -> &str {
        if self.build_host.is_none() {
            let hostname = nix::unistd::gethostname()
                .ok()
                .and_then(|h| h.into_string().ok())
                .unwrap_or_default();
            self.build_host = Some(hostname);
        }
        self.build_host.as_deref().unwrap_or_default()
    }

    /// Resolve a packaged file's on-disk location, applying the
    /// root-prefix override if one is configured.
    pub fn resolve_on_disk(&self, path: &str) -> PathBuf {
        match &self.config.root_prefix {
            Some(root) => join_absolute(root, path),
            None => PathBuf::from(path),
        }
    }

    /// Strip the root-prefix override back off an on-disk path to
    /// recover the path as it should be stored on a `FileRecord`.
    pub fn strip_root<'p>(&self, path: &'p Path) -> &'p Path {
        match &self.config.root_prefix {
            Some(root) => path.strip_prefix(root).unwrap_or(path),
            None => path,
        }
    }
}

fn join_absolute(root: &Path, absolute: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    out.push(absolute.trim_start_matches('/'));
    out
}

#[cfg(test)]
#[path = "./context_test.rs"]
mod context_test;
