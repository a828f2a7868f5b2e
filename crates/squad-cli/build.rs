//! Build script for squad-cli.
//!
//! Exposes `SQUAD_GIT_HASH` and `SQUAD_BUILD_DATE` to `squad --version`.

use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|hash| hash.trim().to_string())
}

fn main() {
    let hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=SQUAD_GIT_HASH={}", hash);

    let date = chrono::Utc::now().format("%Y-%m-%d");
    println!("cargo:rustc-env=SQUAD_BUILD_DATE={}", date);

    println!("cargo:rerun-if-changed=../../.git/HEAD");
}
