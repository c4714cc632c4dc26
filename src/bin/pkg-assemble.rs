// Copyright (c) 2022 Sony Pictures Imageworks, et al.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/imageworks/spk

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;

use pkg_assembler::build::{build_binaries, build_source};
use pkg_assembler::context::{BuildConfig, BuildContext};
use pkg_assembler::spec::SpecHandle;

/// Assemble binary and/or source packages from a build spec.
#[derive(Parser)]
#[clap(name = "pkg-assemble", version)]
struct Cli {
    /// Path to the spec file to build.
    spec_file: PathBuf,

    /// Which outputs to produce.
    #[clap(long, value_enum, default_value_t = Target::All)]
    target: Target,

    /// Increase logging verbosity; repeatable.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, ValueEnum)]
enum Target {
    Binary,
    Source,
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbose).context("failed to set up logging")?;

    let spec = SpecHandle::load(&cli.spec_file)
        .with_context(|| format!("failed to load spec file {}", cli.spec_file.display()))?;

    let mut config = BuildConfig::load().context("failed to load configuration")?;
    config.verbose = cli.verbose > 0;
    let mut ctx = BuildContext::new(config);
    ctx.mark_build_time(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64,
    );

    if matches!(cli.target, Target::Binary | Target::All) {
        let outputs = build_binaries(&mut ctx, &spec).context("failed to build binary package(s)")?;
        for output in outputs {
            tracing::info!(path = %output.display(), "wrote binary package");
        }
    }

    if matches!(cli.target, Target::Source | Target::All) {
        let output = build_source(&mut ctx, &spec).context("failed to build source package")?;
        tracing::info!(path = %output.display(), "wrote source package");
    }

    Ok(())
}

/// Wire up `tracing-subscriber` with an `EnvFilter` driven by
/// verbosity, with an escape hatch via `RUST_LOG` for debugging.
fn configure_logging(verbosity: u8) -> Result<()> {
    let directives = match verbosity {
        0 => "pkg_assembler=info",
        1 => "pkg_assembler=debug",
        _ => "pkg_assembler=trace",
    };
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| directives.to_string());

    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let registry = tracing_subscriber::Registry::default().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2);
    tracing::subscriber::set_global_default(registry.with(fmt_layer))
        .context("failed to set default logger")
}
