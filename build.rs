use std::env;

fn main() {
    // Version string shown by `hubconn --version`
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "debug" {
        println!("cargo:rustc-env=HUBCONN_VERSION={version}-debug");
    } else {
        println!("cargo:rustc-env=HUBCONN_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
