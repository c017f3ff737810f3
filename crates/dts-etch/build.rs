//! Build script for dts-etch
//!
//! Rebuilds when the embedded HTML report template changes.

fn main() {
    println!("cargo:rerun-if-changed=src/html/templates/");
    println!("cargo:rerun-if-changed=build.rs");
}
