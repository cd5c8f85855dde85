use std::path::{Path, PathBuf};
use std::process::Command;

type BuildResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Embed the XDP scan detector (`scanwatch-xdp`) when the `ebpf` feature is on.
///
/// The kernel crate is compiled by a nested cargo for `bpfel-unknown-none`
/// and the ELF is copied to `$OUT_DIR/scanwatch.bpf.o`, where `probe.rs`
/// picks it up with `aya::include_bytes_aligned!`.
///
/// Requirements: Rust nightly with `rust-src`, and `bpf-linker`. The
/// `rust-toolchain.toml` in `scanwatch-xdp/` pins the channel.
fn main() -> BuildResult<()> {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_EBPF");
    if std::env::var_os("CARGO_FEATURE_EBPF").is_none() {
        return Ok(());
    }

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let root = manifest_dir.parent().ok_or("scanwatch crate has no parent directory")?;
    let xdp_dir = root.join("scanwatch-xdp");

    for watched in [
        xdp_dir.join("src"),
        xdp_dir.join("Cargo.toml"),
        root.join("scanwatch-common/src"),
    ] {
        println!("cargo:rerun-if-changed={}", watched.display());
    }

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let target_dir = out_dir.join("xdp-target");
    build_xdp(&xdp_dir, &target_dir)?;

    let elf = target_dir.join("bpfel-unknown-none/release/scanwatch-xdp");
    if !elf.exists() {
        return Err(format!("XDP object missing after build: {}", elf.display()).into());
    }
    std::fs::copy(&elf, out_dir.join("scanwatch.bpf.o"))?;
    Ok(())
}

/// Run the nested cargo build of the kernel crate.
///
/// Cargo exports the host toolchain to build scripts through these variables;
/// left in place they would override the nightly pin of `scanwatch-xdp`.
fn build_xdp(xdp_dir: &Path, target_dir: &Path) -> BuildResult<()> {
    const HOST_TOOLCHAIN_VARS: [&str; 6] = [
        "RUSTC",
        "RUSTDOC",
        "RUSTUP_TOOLCHAIN",
        "RUSTC_WRAPPER",
        "RUSTC_WORKSPACE_WRAPPER",
        "CARGO_ENCODED_RUSTFLAGS",
    ];

    let mut cargo = Command::new("cargo");
    cargo
        .args(["build", "--release", "--package", "scanwatch-xdp"])
        .env("CARGO_TARGET_DIR", target_dir)
        .current_dir(xdp_dir);
    for var in HOST_TOOLCHAIN_VARS {
        cargo.env_remove(var);
    }

    let status = cargo.status().map_err(|e| format!("failed to run cargo: {e}"))?;
    if !status.success() {
        return Err(format!(
            "building scanwatch-xdp failed ({status}); install the BPF toolchain with:\n  \
             rustup toolchain install nightly --component rust-src\n  \
             cargo install bpf-linker"
        )
        .into());
    }
    Ok(())
}
