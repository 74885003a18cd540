use std::process::Command;

// Records the compiler version for the "Runtime Version" line of the `info`
// page. Left unset when rustc can't be queried; the page then shows nothing.
fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = match Command::new(rustc).arg("--version").output() {
        Ok(output) if output.status.success() => output,
        _ => return,
    };
    if let Ok(version) = String::from_utf8(output.stdout) {
        println!("cargo:rustc-env=RUSTC_VERSION={}", version.trim());
    }
}
