// Message types published by the teleop

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_X, DEFAULT_Y, DEFAULT_Z};

/// Wall-clock timestamp, split like a ROS time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Time {
    pub sec: u64,
    pub nanosec: u32,
}

impl Time {
    pub fn now() -> Self {
        // A clock before the epoch stamps zero rather than failing the tick
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            sec: since_epoch.as_secs(),
            nanosec: since_epoch.subsec_nanos(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Orientation as a unit quaternion (x, y, z, w)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation about the z axis only (roll = pitch = 0)
    pub fn from_yaw(yaw: f64) -> Self {
        let (sin, cos) = (yaw * 0.5).sin_cos();
        Self {
            x: 0.0,
            y: 0.0,
            z: sin,
            w: cos,
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

// Teleop -> pose controller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

impl PoseStamped {
    /// Stamp a pose with the current time
    pub fn new(frame_id: &str, pose: Pose) -> Self {
        Self {
            header: Header {
                stamp: Time::now(),
                frame_id: frame_id.to_owned(),
            },
            pose,
        }
    }

    /// Pose sent once on shutdown: default position, identity orientation
    pub fn safe(frame_id: &str) -> Self {
        Self::new(
            frame_id,
            Pose {
                position: Point {
                    x: DEFAULT_X,
                    y: DEFAULT_Y,
                    z: DEFAULT_Z,
                },
                orientation: Quaternion::IDENTITY,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_quat_eq(q: Quaternion, expected: (f64, f64, f64, f64)) {
        assert!((q.x - expected.0).abs() < EPS, "x: {} vs {}", q.x, expected.0);
        assert!((q.y - expected.1).abs() < EPS, "y: {} vs {}", q.y, expected.1);
        assert!((q.z - expected.2).abs() < EPS, "z: {} vs {}", q.z, expected.2);
        assert!((q.w - expected.3).abs() < EPS, "w: {} vs {}", q.w, expected.3);
    }

    #[test]
    fn test_zero_yaw_is_identity() {
        assert_eq!(Quaternion::from_yaw(0.0), Quaternion::IDENTITY);
    }

    #[test]
    fn test_quarter_turn_yaw() {
        let q = Quaternion::from_yaw(FRAC_PI_2);
        assert_quat_eq(q, (0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2));
    }

    #[test]
    fn test_negative_half_turn_yaw() {
        let q = Quaternion::from_yaw(-PI);
        assert_quat_eq(q, (0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_yaw_quaternion_is_unit() {
        for yaw in [-7.3, -1.0, 0.3, 2.0, 12.5] {
            let q = Quaternion::from_yaw(yaw);
            let norm = (q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w).sqrt();
            assert!((norm - 1.0).abs() < EPS, "yaw {} gave norm {}", yaw, norm);
        }
    }

    #[test]
    fn test_safe_pose() {
        let msg = PoseStamped::safe("world");
        assert_eq!(msg.header.frame_id, "world");
        assert_eq!(
            msg.pose.position,
            Point {
                x: 0.0,
                y: 0.0,
                z: 1.0
            }
        );
        assert_eq!(msg.pose.orientation, Quaternion::IDENTITY);
        assert!(msg.header.stamp.sec > 0);
    }

    #[test]
    fn test_json_layout() {
        let msg = PoseStamped::safe("world");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["header"]["frame_id"], "world");
        assert_eq!(value["pose"]["position"]["z"], 1.0);
        assert_eq!(value["pose"]["orientation"]["w"], 1.0);
        assert!(value["header"]["stamp"]["nanosec"].is_u64());
    }
}
