use std::env;

fn main() {
    // Pass CPU frequency for timer calculations
    println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");

    // Debug vs Release configurations
    if env::var("PROFILE").map(|p| p == "debug").unwrap_or(false) {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }

    // Host builds run the simulated schedule and the test suite
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega328p");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
