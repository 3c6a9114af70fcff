//! # Orientation Frames
//!
//! Orthonormal frames built from a forward direction and an up hint.
//!
//! Local coordinates follow the look-rotation convention: `x` along the
//! right axis, `y` along the up axis and `z` along the forward axis. A
//! node's `radius_x` is therefore measured along `right` and `radius_y`
//! along `up`.

use config::constants::UP_PARALLEL_THRESHOLD;
use glam::{DMat3, DQuat, DVec3};

/// Forward axis used when no direction can be derived.
pub const DEFAULT_FORWARD: DVec3 = DVec3::Z;

/// Up hint used unless it is nearly parallel to forward.
pub const WORLD_UP: DVec3 = DVec3::Y;

/// Substitute up hint for nearly vertical forward directions.
pub const FALLBACK_UP: DVec3 = DVec3::X;

/// An orthonormal right/up/forward basis.
///
/// # Example
///
/// ```rust
/// use body_skeleton::Frame;
/// use glam::DVec3;
///
/// let frame = Frame::look_rotation(DVec3::X, DVec3::Y);
/// let local = frame.to_local(DVec3::new(2.0, 0.0, 0.0));
/// assert!((local.z - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    right: DVec3,
    up: DVec3,
    forward: DVec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            right: DVec3::X,
            up: DVec3::Y,
            forward: DVec3::Z,
        }
    }
}

impl Frame {
    /// Builds a frame looking along `forward` with `up` as the up hint.
    ///
    /// A zero `forward` falls back to [`DEFAULT_FORWARD`]. When `forward` is
    /// nearly parallel to the hint, [`FALLBACK_UP`] is used instead.
    pub fn look_rotation(forward: DVec3, up: DVec3) -> Self {
        let forward = match forward.try_normalize() {
            Some(f) => f,
            None => DEFAULT_FORWARD,
        };
        let up = if forward.dot(up).abs() > UP_PARALLEL_THRESHOLD {
            FALLBACK_UP
        } else {
            up
        };

        let right = up.cross(forward).normalize_or_zero();
        let up = forward.cross(right);
        Self { right, up, forward }
    }

    /// Builds a frame looking along `forward` with world up as the hint.
    pub fn from_forward(forward: DVec3) -> Self {
        Self::look_rotation(forward, WORLD_UP)
    }

    /// Local x axis.
    #[inline]
    pub fn right(&self) -> DVec3 {
        self.right
    }

    /// Local y axis.
    #[inline]
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Local z axis.
    #[inline]
    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    /// Expresses a world-space offset in this frame.
    #[inline]
    pub fn to_local(&self, offset: DVec3) -> DVec3 {
        DVec3::new(
            offset.dot(self.right),
            offset.dot(self.up),
            offset.dot(self.forward),
        )
    }

    /// Maps a local offset back to world space.
    #[inline]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.right * local.x + self.up * local.y + self.forward * local.z
    }

    /// The rotation taking world axes onto this frame.
    pub fn orientation(&self) -> DQuat {
        DQuat::from_mat3(&DMat3::from_cols(self.right, self.up, self.forward))
    }
}
