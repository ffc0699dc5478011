/// Rotation state and the plane rotations that drive the wireframe view
use nalgebra::{Point2, Point3, Rotation2};

/// Axis a rotation slider controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Rotation state around three axes (in degrees, kept in `[0, 360)`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: normalize_degrees(x),
            y: normalize_degrees(y),
            z: normalize_degrees(z),
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Set one axis from a slider value
    pub fn set(&mut self, axis: Axis, degrees: f32) {
        let degrees = normalize_degrees(degrees);
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Plane rotations used by the projection pipeline
pub struct Transform;

impl Transform {
    /// Rotate `(x, y)` around the origin by `degrees`
    pub fn rotate_point(x: f32, y: f32, degrees: f32) -> (f32, f32) {
        let rotated = Rotation2::new(degrees.to_radians()) * Point2::new(x, y);
        (rotated.x, rotated.y)
    }

    /// Apply the view rotation to a world point.
    ///
    /// This is three plane rotations in a fixed order: (x, y) by the Z angle,
    /// then (x, z) by the X angle, then (y, z) by the Y angle. It is not an
    /// Euler-angle convention and the order matters.
    pub fn apply(rotation: &RotationState, point: &Point3<f32>) -> Point3<f32> {
        let (x, y) = Self::rotate_point(point.x, point.y, rotation.z);
        let (x, z) = Self::rotate_point(x, point.z, rotation.x);
        let (y, z) = Self::rotate_point(y, z, rotation.y);
        Point3::new(x, y, z)
    }
}
