/// Camera and perspective projection between world and canvas space
use nalgebra::{Point2, Point3, Vector2};

use crate::transform::{RotationState, Transform};

/// Default eye distance used by the perspective divide
pub const DEFAULT_DISTANCE: f32 = 500.0;

/// Smallest `|distance + z|` the perspective divide accepts
const MIN_DEPTH: f32 = 1e-6;

/// Camera configuration for the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub distance: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            distance: DEFAULT_DISTANCE,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Canvas centre, the screen position of the world origin
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Perspective scaling factor `distance / (distance + z)`
    pub fn perspective_factor(&self, z: f32) -> Option<f32> {
        let depth = self.distance + z;
        // Prevent division by near-zero depth values
        if depth.abs() < MIN_DEPTH {
            return None;
        }
        Some(self.distance / depth)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Rotates (x, y) by `rotation_z` degrees, applies the perspective factor
    /// for the point's z, then moves the origin to the canvas centre. Returns
    /// `None` when the point sits on the eye plane.
    pub fn project_to_screen(&self, point: &Point3<f32>, rotation_z: f32) -> Option<Point2<f32>> {
        let f = self.perspective_factor(point.z)?;
        let (x, y) = Transform::rotate_point(point.x, point.y, rotation_z);
        Some(self.center() + Vector2::new(x * f, y * f))
    }

    /// Map a canvas position back into world space for a new vertex.
    ///
    /// This is an approximation, not the inverse of the redraw transform: the
    /// click is assumed to lie at z = 0, Z is undone on (x, y), the X and Y
    /// reversals only feed into x and y, and the depth is rebuilt from the
    /// perspective factor. `active_z` offsets the depth while a drag is held.
    pub fn unproject_from_screen(
        &self,
        screen: &Point2<f32>,
        rotation: &RotationState,
        active_z: Option<f32>,
    ) -> Point3<f32> {
        let centered = *screen - self.center();

        let (x, y) = Transform::rotate_point(centered.x, centered.y, -rotation.z);
        let (x, z) = Transform::rotate_point(x, 0.0, -rotation.x);
        let (y, _) = Transform::rotate_point(y, z, -rotation.y);

        let f = self.perspective_factor(0.0).unwrap_or(1.0);
        let depth = self.distance * (1.0 - 1.0 / f) + active_z.unwrap_or(0.0);

        Point3::new(x / f, y / f, depth)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(500, 500)
    }
}
