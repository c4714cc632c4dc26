// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Canonical tag numbers for entries in a [`super::Header`].
//!
//! The numeric values mirror the historical header tags used by the
//! original package format this assembler targets, so that a header
//! produced here reads the same way a reader of that format would
//! expect. Nothing about the *meaning* of a tag is enforced here; the
//! header is just a typed map from these numbers to values.

use super::Tag;

pub const NAME: Tag = Tag(1000);
pub const VERSION: Tag = Tag(1001);
pub const RELEASE: Tag = Tag(1002);
pub const BUILDTIME: Tag = Tag(1006);
pub const BUILDHOST: Tag = Tag(1007);
pub const SIZE: Tag = Tag(1009);
pub const GIF: Tag = Tag(1012);
pub const XPM: Tag = Tag(1013);
pub const FILENAMES: Tag = Tag(1017);
pub const OS: Tag = Tag(1021);
pub const ARCH: Tag = Tag(1022);
pub const PREIN: Tag = Tag(1023);
pub const POSTIN: Tag = Tag(1024);
pub const PREUN: Tag = Tag(1025);
pub const POSTUN: Tag = Tag(1026);
pub const FILESIZES: Tag = Tag(1028);
pub const FILEMODES: Tag = Tag(1030);
pub const FILERDEVS: Tag = Tag(1033);
pub const FILEMTIMES: Tag = Tag(1034);
pub const FILEMD5S: Tag = Tag(1035);
pub const FILELINKTOS: Tag = Tag(1036);
pub const FILEFLAGS: Tag = Tag(1037);
pub const FILEUSERNAME: Tag = Tag(1039);
pub const FILEGROUPNAME: Tag = Tag(1040);
pub const ICON: Tag = Tag(1043);
pub const FILEUIDS: Tag = Tag(1046);
pub const FILEGIDS: Tag = Tag(1047);

/// Tags that describe a build-time script hook. These are never
/// propagated from a primary header into a sub-package header that
/// did not already define them.
pub const SCRIPT_HOOKS: [Tag; 4] = [PREIN, POSTIN, PREUN, POSTUN];

/// Look up a tag by its canonical name, for parsing headers authored
/// as YAML.
pub fn by_name(name: &str) -> Option<Tag> {
    Some(match name {
        "NAME" => NAME,
        "VERSION" => VERSION,
        "RELEASE" => RELEASE,
        "BUILDTIME" => BUILDTIME,
        "BUILDHOST" => BUILDHOST,
        "SIZE" => SIZE,
        "GIF" => GIF,
        "XPM" => XPM,
        "FILENAMES" => FILENAMES,
        "OS" => OS,
        "ARCH" => ARCH,
        "PREIN" => PREIN,
        "POSTIN" => POSTIN,
        "PREUN" => PREUN,
        "POSTUN" => POSTUN,
        "FILESIZES" => FILESIZES,
        "FILEMODES" => FILEMODES,
        "FILERDEVS" => FILERDEVS,
        "FILEMTIMES" => FILEMTIMES,
        "FILEMD5S" => FILEMD5S,
        "FILELINKTOS" => FILELINKTOS,
        "FILEFLAGS" => FILEFLAGS,
        "FILEUSERNAME" => FILEUSERNAME,
        "FILEGROUPNAME" => FILEGROUPNAME,
        "ICON" => ICON,
        "FILEUIDS" => FILEUIDS,
        "FILEGIDS" => FILEGIDS,
        _ => return None,
    })
}
