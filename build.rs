use std::env;

// Pick the default machine `Digit` from the target's pointer width, unless
// one of the `u32` / `u64` features forces it.
//
// Note that `cfg(target_pointer_width)` inside a build script describes the
// host, hence the environment lookup.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let forced = env::var_os("CARGO_FEATURE_U32").is_some()
        || env::var_os("CARGO_FEATURE_U64").is_some();
    if forced {
        return;
    }

    match env::var("CARGO_CFG_TARGET_POINTER_WIDTH").as_deref() {
        Ok("64") => println!("cargo:rustc-cfg=feature=\"u64\""),
        _ => println!("cargo:rustc-cfg=feature=\"u32\""),
    }
}
