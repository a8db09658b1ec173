use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Кладёт config.toml из корня workspace рядом с бинарником (target/debug | target/release)
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let profile = env::var("PROFILE").expect("PROFILE is set by cargo");

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let Some(target_dir) = out_dir.ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=Target profile directory not found, config.toml not copied");
        return;
    };

    let source_config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the embedded default will be used",
            source_config
        );
        return;
    }

    let dest_config = target_dir.join("config.toml");
    fs::copy(&source_config, &dest_config)
        .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
}
