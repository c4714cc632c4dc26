// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Package drivers: the two top-level entry points that turn a
//! [`crate::spec::SpecHandle`] into on-disk output files.

pub mod binary;
pub mod source;

pub use binary::build_binaries;
pub use source::build_source;
