/// Faults that end the teleop loop
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to encode pose: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<zenoh::Error> for TeleopError {
    fn from(e: zenoh::Error) -> Self {
        TeleopError::Transport(e.to_string())
    }
}
