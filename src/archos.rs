// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Architecture/OS identifier lookup. [`ArchOsLookup`] is a small
//! interface kept separate from the drivers that use it, and
//! [`HostArchOsLookup`] is a concrete default so the crate is runnable
//! without a separate lookup table crate.

/// Resolves the small integer codes written into [`crate::lead::LeadingRecord`]
/// and the OS/ARCH header tags, plus the architecture name used in
/// binary package file names (`{name}.{arch-name}.rpm`).
pub trait ArchOsLookup {
    fn arch_num(&self) -> u16;
    fn os_num(&self) -> u16;
    fn arch_name(&self) -> String;
}

/// Looks up codes for the host this process is running on, using
/// `std::env::consts` as the source of truth.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostArchOsLookup;

impl ArchOsLookup for HostArchOsLookup {
    fn arch_num(&self) -> u16 {
        match std::env::consts::ARCH {
            "x86" => 1,
            "x86_64" => 2,
            "aarch64" => 3,
            "arm" => 4,
            "powerpc64" => 5,
            "powerpc" => 6,
            "mips" | "mips64" => 7,
            "riscv64" => 8,
            "s390x" => 9,
            _ => 0,
        }
    }

    fn os_num(&self) -> u16 {
        match std::env::consts::OS {
            "linux" => 1,
            "macos" => 2,
            "freebsd" => 3,
            "windows" => 4,
            "openbsd" => 5,
            "netbsd" => 6,
            _ => 0,
        }
    }

    fn arch_name(&self) -> String {
        std::env::consts::ARCH.to_string()
    }
}
