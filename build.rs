use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo::rustc-check-cfg=cfg(bitcount_native_popcnt)");

    // Cargo sets CARGO_FEATURE_<NAME> for every enabled feature.
    if env::var_os("CARGO_FEATURE_NATIVE_POPCNT").is_none() {
        return;
    }

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // The native kernel only exists for x86_64 POPCNT.
    match target_arch.as_str() {
        "x86_64" => {
            println!("cargo:rustc-cfg=bitcount_native_popcnt");
        }
        other => {
            println!(
                "cargo:warning=native-popcnt: no native kernel for target arch '{}': using portable count_ones",
                other
            );
        }
    }
}
