use std::path::PathBuf;
use std::process::Command;

// Host builds compile the campaign contract to wasm so the factory tests can
// upload and deploy it. `cfg(campaign_wasm)` is set once the artifact exists.
fn main() {
    println!("cargo:rustc-check-cfg=cfg(campaign_wasm)");
    println!("cargo:rerun-if-changed=../campaign_contract/src");
    println!("cargo:rerun-if-changed=../campaign_contract/Cargo.toml");
    println!("cargo:rerun-if-env-changed=CAMPAIGN_SKIP_WASM");

    let target = std::env::var("TARGET").unwrap_or_default();
    if target.starts_with("wasm32") {
        return;
    }

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let target_dir = manifest_dir.join("../../target/campaign-wasm");
    let wasm = target_dir.join("wasm32v1-none/release/campaign_contract.wasm");

    if std::env::var("CAMPAIGN_SKIP_WASM").is_err() {
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let status = Command::new(cargo)
            .args([
                "build",
                "--package",
                "campaign_contract",
                "--target",
                "wasm32v1-none",
                "--release",
                "--target-dir",
            ])
            .arg(&target_dir)
            .current_dir(&manifest_dir)
            .env_remove("CARGO_ENCODED_RUSTFLAGS")
            .env_remove("RUSTFLAGS")
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => println!("cargo:warning=campaign wasm build failed: {status}"),
            Err(err) => println!("cargo:warning=campaign wasm build failed: {err}"),
        }
    }

    if wasm.exists() {
        println!("cargo:rustc-cfg=campaign_wasm");
    } else {
        println!("cargo:warning=campaign wasm not found, deployment tests are skipped");
    }
}
