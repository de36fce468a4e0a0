// Teleop controller: accumulates key deltas into a commanded pose

use tracing::info;

use crate::config::{
    DEFAULT_STEP, DEFAULT_X, DEFAULT_Y, DEFAULT_YAW, DEFAULT_Z, MAX_STEP, MIN_STEP, STEP_INCREMENT,
};
use crate::keys::{Binding, Delta, Key};
use crate::messages::{Point, Pose, PoseStamped, Quaternion};

/// Commanded pose in the world frame (unbounded)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            z: DEFAULT_Z,
            yaw: DEFAULT_YAW,
        }
    }
}

impl From<&PoseState> for Pose {
    fn from(state: &PoseState) -> Self {
        Self {
            position: Point {
                x: state.x,
                y: state.y,
                z: state.z,
            },
            orientation: Quaternion::from_yaw(state.yaw),
        }
    }
}

/// Whether the loop keeps running after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Teleop {
    pose: PoseState,
    step: f64, // always within [MIN_STEP, MAX_STEP]
}

impl Default for Teleop {
    fn default() -> Self {
        Self::new()
    }
}

impl Teleop {
    pub fn new() -> Self {
        Self {
            pose: PoseState::default(),
            step: DEFAULT_STEP,
        }
    }

    pub fn pose(&self) -> PoseState {
        self.pose
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Apply one tick's input; `None` is a timeout and changes nothing
    pub fn handle(&mut self, key: Option<Key>) -> Control {
        let Some(key) = key else {
            return Control::Continue;
        };
        if key == Key::Interrupt {
            return Control::Quit;
        }

        match Binding::for_key(key) {
            Some(Binding::Delta(delta)) => self.apply(delta),
            Some(Binding::Reset) => {
                self.reset();
                info!("Position reset to default");
            }
            Some(Binding::IncreaseStep) => {
                self.step = (self.step + STEP_INCREMENT).min(MAX_STEP);
                info!("Step increased to: {}", self.step);
            }
            Some(Binding::DecreaseStep) => {
                self.step = (self.step - STEP_INCREMENT).max(MIN_STEP);
                info!("Step decreased to: {}", self.step);
            }
            None => {}
        }
        Control::Continue
    }

    /// Back to the default pose; the step is kept
    pub fn reset(&mut self) {
        self.pose = PoseState::default();
    }

    /// Stamp the current pose for publishing
    pub fn pose_message(&self, frame_id: &str) -> PoseStamped {
        PoseStamped::new(frame_id, Pose::from(&self.pose))
    }

    fn apply(&mut self, delta: Delta) {
        self.pose.x += delta.x * self.step;
        self.pose.y += delta.y * self.step;
        self.pose.z += delta.z * self.step;
        self.pose.yaw += delta.yaw * self.step;
    }
}
