//! Build script for plmerge.
//!
//! Copies the `.env.example` configuration template into the local data
//! directory, next to where the application looks for its `.env` file:
//! - Linux: `~/.local/share/plmerge/.env.example`
//! - macOS: `~/Library/Application Support/plmerge/.env.example`
//! - Windows: `%LOCALAPPDATA%/plmerge/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template into the local data directory.
///
/// # Build Process
///
/// 1. **Dependency Tracking**: re-runs when `.env.example` changes
/// 2. **Path Resolution**: template in the crate root, target in the data dir
/// 3. **Copying**: creates the target directory and copies the template
///
/// # Errors
///
/// Only a missing `CARGO_MANIFEST_DIR` fails the build. A missing template or
/// an unwritable data directory are reported as cargo warnings.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("plmerge");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // read-only build environments must not fail the build
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
    {
        println!(
            "cargo:warning=cannot copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
