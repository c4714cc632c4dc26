// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Assembles binary and source packages from a parsed build spec.
//!
//! Given a [`spec::SpecHandle`], [`build::build_binaries`] and
//! [`build::build_source`] drive the manifest-expansion, header, and
//! archive-emission pipelines that produce the on-disk package files.
//! Build-spec-file parsing proper, the arch/OS lookup table, and
//! package signing are intentionally thin or out of scope here.

pub mod archive;
pub mod archos;
pub mod build;
pub mod context;
pub mod error;
pub mod header;
pub mod lead;
pub mod manifest;
pub mod spec;

pub use error::{Error, Result};
