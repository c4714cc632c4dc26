// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use super::*;

#[test]
fn default_config_has_no_root_prefix_override() {
    let config = BuildConfig::default();
    assert!(config.root_prefix.is_none());
}

#[test]
fn build_time_is_zero_until_marked() {
    let ctx = BuildContext::new(BuildConfig::default());
    assert_eq!(ctx.build_time(), 0);
}

#[test]
fn marking_build_time_sticks() {
    let mut ctx = BuildContext::new(BuildConfig::default());
    ctx.mark_build_time(1_700_000_000);
    assert_eq!(ctx.build_time(), 1_700_000_000);
}

#[test]
fn resolve_on_disk_joins_under_root_prefix() {
    let mut config = BuildConfig::default();
    config.root_prefix = Some(PathBuf::from("/stage"));
    let ctx = BuildContext::new(config);
    assert_eq!(
        ctx.resolve_on_disk("/usr/bin/foo"),
        PathBuf::from("/stage/usr/bin/foo")
    );
}

#[test]
fn resolve_on_disk_is_identity_without_root_prefix() {
    let ctx = BuildContext::new(BuildConfig::default());
    assert_eq!(ctx.resolve_on_disk("/usr/bin/foo"), PathBuf::from("/usr/bin/foo"));
}

#[test]
fn strip_root_recovers_the_stored_path() {
    let mut config = BuildConfig::default();
    config.root_prefix = Some(PathBuf::from("/stage"));
    let ctx = BuildContext::new(config);
    let on_disk = PathBuf::from("/stage/usr/bin/foo");
    assert_eq!(ctx.strip_root(&on_disk), Path::new("usr/bin/foo"));
}
