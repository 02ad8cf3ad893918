//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pocketlist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("pocketlist_core ping={}", pocketlist_core::ping());
    println!("pocketlist_core version={}", pocketlist_core::core_version());
}
