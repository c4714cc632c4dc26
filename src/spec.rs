// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The parsed build specification. Spec-file parsing proper lives
//! elsewhere; this module is the minimal concrete data model needed to
//! have something to build packages from, deserialized from YAML.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::header::Header;
use crate::Result;

/// Sentinel file-list value meaning "this sub-package declares no
/// files and should be skipped entirely".
pub const NO_FILES: &str = "undefined";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubPackageSpec {
    /// Appended to the base name as `-{suffix}` when no full override is set.
    pub name_suffix: Option<String>,
    /// Complete replacement for the derived output base name.
    pub name_override: Option<String>,
    pub icon: Option<PathBuf>,
    #[serde(default)]
    pub file_list: String,
    /// Prebuilt per-sub-package header, authored as a map of canonical
    /// tag names to scalar string values.
    #[serde(default, rename = "header")]
    header_entries: HashMap<String, String>,
    #[serde(skip)]
    pub header: Header,
}

impl SubPackageSpec {
    /// True unless this sub-package's file list is the "no files declared" sentinel.
    pub fn has_files(&self) -> bool {
        self.file_list.trim() != NO_FILES && !self.file_list.trim().is_empty()
    }

    pub fn with_file_list(file_list: impl Into<String>) -> Self {
        Self {
            file_list: file_list.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecHandle {
    pub base_name: String,
    pub spec_file: PathBuf,
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    pub sub_packages: Vec<SubPackageSpec>,
}

impl SpecHandle {
    pub fn new(
        base_name: impl Into<String>,
        spec_file: impl Into<PathBuf>,
        sources: Vec<PathBuf>,
        sub_packages: Vec<SubPackageSpec>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            spec_file: spec_file.into(),
            sources,
            sub_packages,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut spec: Self = serde_yaml::from_str(text)?;
        for sub in &mut spec.sub_packages {
            sub.header = Header::from_named_scalars(std::mem::take(&mut sub.header_entries))?;
        }
        Ok(spec)
    }

    /// The first sub-package's header is the primary one whose entries
    /// propagate to its siblings.
    pub fn primary_header(&self) -> Option<&Header> {
        self.sub_packages.first().map(|s| &s.header)
    }
}

#[cfg(test)]
#[path = "./spec_test.rs"]
mod spec_test;
