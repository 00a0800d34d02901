//! Embed a version string for `authgate --version`.
//!
//! `AUTHGATE_VERSION` in the build environment wins, then `git describe`,
//! then the package version.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=AUTHGATE_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = std::env::var("AUTHGATE_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=AUTHGATE_VERSION={}", version);
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    let described = described.strip_prefix('v').unwrap_or(described);

    (!described.is_empty()).then(|| described.to_string())
}
