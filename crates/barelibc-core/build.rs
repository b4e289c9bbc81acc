fn main() {
    println!("cargo:rustc-check-cfg=cfg(thumb_mode)");
    // r7 is the frame pointer on thumb targets and cannot be bound directly.
    let target = std::env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumb") {
        println!("cargo:rustc-cfg=thumb_mode");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
