// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-env-changed=PHONE_DISPLAY_VERSION");

    // Packagers can pin the version string
    let version = std::env::var("PHONE_DISPLAY_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(describe_version);

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Crate version with the short commit hash appended when git is available
/// ("0.1.0-abcdef1"), or the bare crate version otherwise.
fn describe_version() -> String {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());

    match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
            if dirty {
                format!("{}-dirty-{}", pkg_version, hash)
            } else {
                format!("{}-{}", pkg_version, hash)
            }
        }
        None => pkg_version,
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
