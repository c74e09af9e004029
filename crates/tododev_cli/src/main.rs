//! `tododev` entry point.
//!
//! # Responsibility
//! - Parse arguments and dispatch to toolchain wrappers or core lifecycle
//!   operations.
//! - Map every outcome to a process exit code.

mod cli;
mod toolchain;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::{ExitCode, ExitStatus};
use tododev_core::{DbResult, Progress, ProjectLayout};

const STDERR_LOG_LEVEL: &str = "warn";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.clone().unwrap_or_else(|| {
        if cli.log_dir.is_some() {
            tododev_core::default_log_level().to_string()
        } else {
            STDERR_LOG_LEVEL.to_string()
        }
    });
    if let Err(err) = tododev_core::init_logging(&level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::from(2);
    }

    let root = match project_root(cli.project_root) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("error: cannot determine project root: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut layout = ProjectLayout::new(&root);
    if let Some(config) = cli.config {
        layout = layout.with_config_file(config);
    }

    match cli.command {
        Commands::Run => cargo(&root, toolchain::RUN),
        Commands::Watch => {
            let outcome = toolchain::run_cargo(&root, toolchain::WATCH);
            if !matches!(&outcome, Ok(status) if status.success()) {
                println!("cargo-watch not found or failed. Install with: cargo install cargo-watch");
            }
            exit_code(outcome)
        }
        Commands::Test => cargo(&root, toolchain::TEST),
        Commands::Fmt => cargo(&root, toolchain::FMT),
        Commands::Clippy => cargo(&root, toolchain::CLIPPY),
        Commands::Check => cargo(&root, toolchain::CHECK),
        Commands::Migrate => lifecycle(&layout, |layout, reporter| {
            tododev_core::migrate(layout, reporter).map(drop)
        }),
        Commands::ResetDb => lifecycle(&layout, |layout, reporter| {
            tododev_core::reset(layout, reporter).map(drop)
        }),
        Commands::Seed => lifecycle(&layout, |layout, reporter| {
            tododev_core::seed(layout, reporter).map(drop)
        }),
        Commands::DbInfo => lifecycle(&layout, |layout, _| {
            let status = tododev_core::inspect(layout)?;
            println!("url: {}", status.url);
            println!("path: {}", status.path.display());
            println!("exists: {}", status.exists);
            if status.migrations.is_empty() {
                println!("migrations: (none)");
            }
            for name in &status.migrations {
                println!("migration: {name}");
            }
            Ok(())
        }),
    }
}

fn project_root(explicit: Option<PathBuf>) -> std::io::Result<PathBuf> {
    match explicit {
        Some(root) => Ok(root),
        None => std::env::current_dir(),
    }
}

fn cargo(root: &Path, args: &[&str]) -> ExitCode {
    exit_code(toolchain::run_cargo(root, args))
}

fn exit_code(outcome: std::io::Result<ExitStatus>) -> ExitCode {
    match outcome {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            let code = status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
        Err(err) => {
            eprintln!("error: failed to launch cargo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn lifecycle<F>(layout: &ProjectLayout, operation: F) -> ExitCode
where
    F: FnOnce(&ProjectLayout, &mut dyn tododev_core::ProgressReporter) -> DbResult<()>,
{
    let mut reporter = |event: Progress| println!("{event}");
    match operation(layout, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
