//! Embeds the release version into the `itd` binary as `ITD_VERSION`.

use std::process::Command;

fn main() {
    // Re-run when the checked-out commit or tags move
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Outside a git checkout (crates.io tarball) the manifest version is all we have
    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=ITD_VERSION={version}");
}

/// Nearest tag plus distance and dirty marker, e.g. `0.1.0-3-gabc123-dirty`.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    // Release tags are `v0.1.0`; clap prints the version after the binary name
    let described = described.trim().trim_start_matches('v');
    (!described.is_empty()).then(|| described.to_string())
}
