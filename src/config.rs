// Timeouts, topics, pose defaults, CLI arguments
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

// Key poll timeout, also the publish period (~10 Hz)
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

// Zenoh topics
pub const TOPIC_POSE: &str = "firefly/command/pose"; // commanded pose

// Reference frame stamped on every pose
pub const FRAME_ID: &str = "world";

// Default (and safe) pose
pub const DEFAULT_X: f64 = 0.0;
pub const DEFAULT_Y: f64 = 0.0;
pub const DEFAULT_Z: f64 = 1.0;
pub const DEFAULT_YAW: f64 = 0.0;

// Step size per keystroke
pub const DEFAULT_STEP: f64 = 0.1;
pub const STEP_INCREMENT: f64 = 0.1;
pub const MIN_STEP: f64 = 0.1;
pub const MAX_STEP: f64 = 10.0;

/// Keyboard teleop publishing a commanded pose over zenoh
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Key expression the pose is published on
    #[arg(long, default_value = TOPIC_POSE)]
    pub topic: String,

    /// Zenoh configuration file (defaults to zenoh's built-in config)
    #[arg(long)]
    pub zenoh_config: Option<PathBuf>,
}
