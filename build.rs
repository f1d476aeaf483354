//! Build script for petfriends-cli
//!
//! Injects the build-time default for API_URL from the environment.
//! It can be overridden at runtime via the same environment variable.

fn main() {
    // Load .env file if present (for local development)
    let _ = dotenvy::dotenv();

    let api_url = std::env::var("API_URL")
        .unwrap_or_else(|_| "https://petfriends.skillfactory.ru".to_string());

    println!("cargo:rustc-env=API_URL={}", api_url);

    println!("cargo:rerun-if-env-changed=API_URL");
    println!("cargo:rerun-if-changed=.env");
}
