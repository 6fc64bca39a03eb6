//! # Planeta Storefront Entry Point
//!
//! Runs a scripted shopping session against the in-memory identity backend
//! and logs every step. Set `RUST_LOG=debug` to see each command.

#[tokio::main]
async fn main() {
    if let Err(e) = planeta_storefront::run().await {
        eprintln!("storefront error: {}", e);
        std::process::exit(1);
    }
}
