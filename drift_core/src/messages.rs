use nalgebra::{Isometry3, Matrix6, Vector3, Vector6};

// =========================================================================
// == Message Building Blocks ==
// =========================================================================

/// Stamp and reference frame shared by every published message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    /// Simulation time in seconds. Conversion to a wire time type is left to the transport.
    pub stamp: f64,
    pub frame_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PoseWithCovariance {
    pub pose: Isometry3<f64>,
    /// Row-major over (x, y, z, roll, pitch, yaw).
    pub covariance: Matrix6<f64>,
}

impl Default for PoseWithCovariance {
    fn default() -> Self {
        Self {
            pose: Isometry3::identity(),
            covariance: Matrix6::zeros(),
        }
    }
}

/// A linear + angular velocity pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TwistWithCovariance {
    pub twist: Twist,
    /// Row-major over (vx, vy, vz, wx, wy, wz).
    pub covariance: Matrix6<f64>,
}

impl Default for TwistWithCovariance {
    fn default() -> Self {
        Self {
            twist: Twist::default(),
            covariance: Matrix6::zeros(),
        }
    }
}

// =========================================================================
// == Public API Messages (Topic Data) ==
// =========================================================================

/// The primary output of the odometry estimator.
/// The pose is expressed in `header.frame_id`, the twist in `child_frame_id`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Odometry {
    pub header: Header,
    pub child_frame_id: String,
    pub pose: PoseWithCovariance,
    pub twist: TwistWithCovariance,
}

impl Odometry {
    /// An empty sample at the frame origin carrying the given frame labels.
    pub fn new(frame_id: impl Into<String>, child_frame_id: impl Into<String>) -> Self {
        Self {
            header: Header {
                stamp: 0.0,
                frame_id: frame_id.into(),
            },
            child_frame_id: child_frame_id.into(),
            ..Default::default()
        }
    }

    /// Overwrites both covariance diagonals with `diagonal`, leaving off-diagonal terms at zero.
    pub fn set_covariance_diagonals(&mut self, diagonal: &[f64; 6]) {
        let diagonal = Vector6::from_column_slice(diagonal);
        self.pose.covariance = Matrix6::from_diagonal(&diagonal);
        self.twist.covariance = Matrix6::from_diagonal(&diagonal);
    }
}
