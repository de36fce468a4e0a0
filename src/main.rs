use clap::Parser;
use tracing_subscriber::EnvFilter;

use key_pose_teleop::config::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Setup logging (set RUST_LOG=info or debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = key_pose_teleop::runtime::run(args).await {
        eprintln!("Teleop error: {}", e);
        std::process::exit(1);
    }
}
