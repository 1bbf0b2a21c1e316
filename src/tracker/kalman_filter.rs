//! Constant-velocity Kalman filter over a track's center point.
//!
//! The state is `[x, y, vx, vy]` with a unit time step per frame. Only the
//! position is observed; velocity is inferred from successive corrections.

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};
use tracing::warn;

/// Noise parameters shared by every track's filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionNoise {
    /// Scale of the identity process-noise covariance (per-frame motion jitter).
    pub process: f64,
    /// Scale of the identity measurement-noise covariance.
    pub measurement: f64,
    /// Initial variance of the seeded position.
    pub initial_position_variance: f64,
    /// Initial variance of the unknown velocity.
    pub initial_velocity_variance: f64,
}

impl Default for MotionNoise {
    fn default() -> Self {
        Self {
            process: 0.03,
            measurement: 1.0,
            initial_position_variance: 1.0,
            initial_velocity_variance: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    state: Vector4<f64>,
    covariance: Matrix4<f64>,
    noise: MotionNoise,
}

#[rustfmt::skip]
fn motion_mat() -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, 1.0, 0.0,
        0.0, 1.0, 0.0, 1.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[rustfmt::skip]
fn update_mat() -> Matrix2x4<f64> {
    Matrix2x4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
    )
}

impl KalmanFilter {
    /// Seed a filter at `(cx, cy)` with zero velocity.
    pub fn initiate(cx: f64, cy: f64, noise: MotionNoise) -> Self {
        let p = noise.initial_position_variance;
        let v = noise.initial_velocity_variance;
        Self {
            state: Vector4::new(cx, cy, 0.0, 0.0),
            covariance: Matrix4::from_diagonal(&Vector4::new(p, p, v, v)),
            noise,
        }
    }

    /// Advance one frame and return the predicted position.
    pub fn predict(&mut self) -> (f64, f64) {
        let f = motion_mat();
        let q = Matrix4::identity() * self.noise.process;

        self.state = f * self.state;
        self.covariance = f * self.covariance * f.transpose() + q;

        self.position()
    }

    /// Fuse a position measurement into the estimate.
    pub fn correct(&mut self, measured_x: f64, measured_y: f64) {
        let h = update_mat();
        let r = Matrix2::identity() * self.noise.measurement;

        let innovation = Vector2::new(measured_x, measured_y) - h * self.state;
        let innovation_cov = h * self.covariance * h.transpose() + r;

        let Some(s_inv) = innovation_cov.try_inverse() else {
            warn!(?innovation_cov, "singular innovation covariance, skipping correction");
            return;
        };

        // K = P * H^T * S^-1
        let kalman_gain = self.covariance * h.transpose() * s_inv;

        self.state += kalman_gain * innovation;
        self.covariance = (Matrix4::identity() - kalman_gain * h) * self.covariance;
    }

    /// Current position estimate `(x, y)`.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.state[0], self.state[1])
    }

    /// Current velocity estimate `(vx, vy)` in pixels per frame.
    #[inline]
    pub fn velocity(&self) -> (f64, f64) {
        (self.state[2], self.state[3])
    }

    pub fn covariance(&self) -> &Matrix4<f64> {
        &self.covariance
    }
}
