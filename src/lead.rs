// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! The fixed-size identifying prefix written at offset zero of every
//! output file.

use std::io::Write;

use crate::Result;

#[cfg(test)]
#[path = "./lead_test.rs"]
mod lead_test;

/// 4-byte signature identifying this as a package assembler output,
/// so a reader can recognize the format before parsing further.
pub const MAGIC: [u8; 4] = *b"PKG\xed";

/// Width, in bytes, of the zero-padded name field.
pub const NAME_LEN: usize = 66;

pub const SIGNATURE_NONE: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Binary,
    Source,
}

impl PackageKind {
    fn wire_code(self) -> u16 {
        match self {
            PackageKind::Binary => 0,
            PackageKind::Source => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingRecord {
    pub major: u8,
    pub minor: u8,
    pub kind: PackageKind,
    pub archnum: u16,
    pub osnum: u16,
    pub signature_type: u16,
    pub name: String,
}

impl LeadingRecord {
    pub fn new(kind: PackageKind, archnum: u16, osnum: u16, name: impl Into<String>) -> Self {
        Self {
            major: 2,
            minor: 0,
            kind,
            archnum,
            osnum,
            signature_type: SIGNATURE_NONE,
            name: name.into(),
        }
    }

    /// Write this record's fixed-width, big-endian wire layout.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&[self.major, self.minor])?;
        writer.write_all(&self.kind.wire_code().to_be_bytes())?;
        writer.write_all(&self.archnum.to_be_bytes())?;
        writer.write_all(&self.osnum.to_be_bytes())?;
        writer.write_all(&self.signature_type.to_be_bytes())?;
        writer.write_all(&pad_name(&self.name))?;
        Ok(())
    }
}

fn pad_name(name: &str) -> [u8; NAME_LEN] {
    let mut buf = [0u8; NAME_LEN];
    let bytes = name.as_bytes();
    let n = bytes.len().min(NAME_LEN);
    buf[..n].copy_from_slice(&bytes[..n]);
    buf
}
