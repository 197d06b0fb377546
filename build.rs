//! Build script for songdata.
//!
//! Copies the `.env.example` template into the user's local data directory so
//! a configuration example sits next to the `.env` file the tool reads.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to `<data_local_dir>/songdata/`.
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or to write the copy fails the build.
///
/// Destination per platform:
/// - Linux: `~/.local/share/songdata/.env.example`
/// - macOS: `~/Library/Application Support/songdata/.env.example`
/// - Windows: `%LOCALAPPDATA%/songdata/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("songdata");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
