use std::env;

fn main() {
    let version =
        env::var("FRESHIFY_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=FRESHIFY_VERSION={version}");

    // Endpoint baked into the binary; runtime config and env still override it.
    let endpoint = env::var("FRESHIFY_ENDPOINT").unwrap_or_default();
    println!("cargo:rustc-env=FRESHIFY_DEFAULT_ENDPOINT={endpoint}");
    println!("cargo:rerun-if-env-changed=FRESHIFY_ENDPOINT");
    println!("cargo:rerun-if-env-changed=FRESHIFY_VERSION");
}
