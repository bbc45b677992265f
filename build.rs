fn main() {
    // Stamped into every generated artifact banner. Release packaging can
    // pin it with PIXELBAKE_BUILD_VERSION; otherwise the package version is used.
    println!("cargo:rerun-if-env-changed=PIXELBAKE_BUILD_VERSION");

    let version = std::env::var("PIXELBAKE_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    println!("cargo:rustc-env=PIXELBAKE_BUILD_VERSION={}", version);
}
