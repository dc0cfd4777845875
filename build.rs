use chrono::{DateTime, Utc};

fn main() {
    // Honour SOURCE_DATE_EPOCH so reproducible builds embed a stable time
    let built_at = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    println!(
        "cargo:rustc-env=BUILD_TIME={}",
        built_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
