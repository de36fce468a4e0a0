// Pose output: JSON over a zenoh publisher

use tracing::debug;

use crate::error::TeleopError;
use crate::messages::PoseStamped;

/// Destination for emitted poses
#[allow(async_fn_in_trait)] // only used through generics, never boxed
pub trait PoseSink {
    async fn publish(&self, pose: &PoseStamped) -> Result<(), TeleopError>;
}

impl PoseSink for zenoh::pubsub::Publisher<'_> {
    async fn publish(&self, pose: &PoseStamped) -> Result<(), TeleopError> {
        let pose_json = serde_json::to_string(pose)?;
        debug!("Publishing pose: {}", pose_json);
        self.put(pose_json).await?;
        Ok(())
    }
}
