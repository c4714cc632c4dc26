// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The file manifest pipeline: turning declarative `%files`-style text
//! into the ordered, stat-backed records the rest of the assembler
//! consumes.

pub mod docdir;
pub mod expand;
pub mod identity;
pub mod populate;
pub mod record;

pub use docdir::DocDirRegistry;
pub use expand::{expand_file_list, Expansion, PackagingMode};
pub use identity::IdentityCache;
pub use populate::populate_file_columns;
pub use record::{FileManifest, FileRecord, FileStat};
