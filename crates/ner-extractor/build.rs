//! Adds the MITIE library directory to the linker search path.

fn main() {
    println!("cargo:rerun-if-env-changed=MITIE_LIB_DIR");

    if std::env::var_os("CARGO_FEATURE_MITIE").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("MITIE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }
}
