//! Thin wrappers around the cargo toolchain.
//!
//! Every command runs in the project root with the parent environment and is
//! echoed as `$ cargo ...` before it starts.

use log::{error, info};
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

pub const RUN: &[&str] = &["run"];
pub const WATCH: &[&str] = &["watch", "-x", "run"];
pub const TEST: &[&str] = &["test"];
pub const FMT: &[&str] = &["fmt"];
pub const CLIPPY: &[&str] = &["clippy", "--", "-D", "warnings"];
pub const CHECK: &[&str] = &["check"];

/// Runs `cargo <args>` in `root` and waits for it.
pub fn run_cargo(root: &Path, args: &[&str]) -> io::Result<ExitStatus> {
    println!("$ {}", render_command(args));
    let status = Command::new("cargo").args(args).current_dir(root).status();
    match &status {
        Ok(status) => info!(
            "event=toolchain module=cli status=exit args={} code={:?}",
            args.join(" "),
            status.code()
        ),
        Err(err) => error!(
            "event=toolchain module=cli status=error args={} error={}",
            args.join(" "),
            err
        ),
    }
    status
}

fn render_command(args: &[&str]) -> String {
    std::iter::once("cargo")
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{render_command, CLIPPY};

    #[test]
    fn clippy_denies_warnings() {
        assert_eq!(render_command(CLIPPY), "cargo clippy -- -D warnings");
    }
}
