// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use super::*;

#[test]
fn caches_repeat_lookups_for_the_same_id() {
    let mut cache = IdentityCache::default();
    let first = cache.user_name(0).to_string();
    let second = cache.user_name(0).to_string();
    assert_eq!(first, second);
}

#[test]
fn unknown_ids_fall_back_to_empty_string() {
    let mut cache = IdentityCache::default();
    // u32::MAX is exceedingly unlikely to resolve on any real host.
    let name = cache.group_name(u32::MAX).to_string();
    assert_eq!(name, "");
}

#[test]
fn cache_grows_past_the_legacy_fixed_cap() {
    let mut cache = IdentityCache::default();
    for uid in 0..2000u32 {
        cache.user_name(uid);
    }
    assert_eq!(cache.users.len(), 2000);
}
