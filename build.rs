//! Build script for the artist collection playlist CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so the expected location already holds a ready-to-edit example
//! after installation:
//! - Linux: `~/.local/share/coleccion/.env.example`
//! - macOS: `~/Library/Application Support/coleccion/.env.example`
//! - Windows: `%LOCALAPPDATA%/coleccion/.env.example`

use std::{env, fs, path::PathBuf};

/// Copies the template, warning instead of failing when it is missing.
///
/// # Errors
///
/// Fails when `CARGO_MANIFEST_DIR` is unavailable or the data directory
/// cannot be created or written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("coleccion");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
