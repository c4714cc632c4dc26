// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

//! Owner/group name resolution, cached per build session.
//!
//! A lookup failure caches and returns the empty string rather than a
//! placeholder name. The cache grows with however many distinct ids
//! the input actually uses, rather than capping at a fixed size.

use std::collections::HashMap;

use nix::unistd::{Gid, Group, Uid, User};

/// Caches uid/gid -> name resolution for the lifetime of a build.
#[derive(Debug, Default)]
pub struct IdentityCache {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl IdentityCache {
    /// Resolve a uid to its login name, caching the empty string if
    /// the id has no passwd entry.
    pub fn user_name(&mut self, uid: u32) -> &str {
        self.users
            .entry(uid)
            .or_insert_with(|| resolve_user(uid))
    }

    /// Resolve a gid to its group name, caching the empty string on
    /// failure.
    pub fn group_name(&mut self, gid: u32) -> &str {
        self.groups
            .entry(gid)
            .or_insert_with(|| resolve_group(gid))
    }
}

fn resolve_user(uid: u32) -> String {
    User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map(|u| u.name)
        .unwrap_or_default()
}

fn resolve_group(gid: u32) -> String {
    Group::from_gid(Gid::from_raw(gid))
        .ok()
        .flatten()
        .map(|g| g.name)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "./identity_test.rs"]
mod identity_test;
