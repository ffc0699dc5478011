/// Redraw driver: projects the whole wireframe and emits draw commands
use nalgebra::{Point2, Vector2};

use crate::mesh::{Mesh, VertexId};
use crate::projection::Camera;
use crate::transform::RotationState;

/// Offset of a vertex label from its point, in pixels
pub const LABEL_OFFSET: (f32, f32) = (10.0, -10.0);

/// Line style requested from the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// A permanent mesh edge
    Edge,
    /// The rubber band shown while dragging out a new edge
    Preview,
}

/// Drawing surface supplied by the front end
pub trait Canvas {
    fn clear(&mut self);
    fn draw_point(&mut self, at: Point2<f32>);
    fn draw_label(&mut self, at: Point2<f32>, text: &str);
    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, stroke: Stroke);
}

/// A recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Point(Point2<f32>),
    Label(Point2<f32>, String),
    Line(Point2<f32>, Point2<f32>, Stroke),
}

/// Recording canvas, used by tests and headless callers
impl Canvas for Vec<DrawCommand> {
    fn clear(&mut self) {
        self.push(DrawCommand::Clear);
    }

    fn draw_point(&mut self, at: Point2<f32>) {
        self.push(DrawCommand::Point(at));
    }

    fn draw_label(&mut self, at: Point2<f32>, text: &str) {
        self.push(DrawCommand::Label(at, text.to_string()));
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, stroke: Stroke) {
        self.push(DrawCommand::Line(from, to, stroke));
    }
}

/// Screen position of every vertex as of the last redraw, keyed by vertex id
#[derive(Debug, Clone, Default)]
pub struct ScreenAnchors {
    positions: Vec<Option<Point2<f32>>>,
}

impl ScreenAnchors {
    pub fn get(&self, id: VertexId) -> Option<Point2<f32>> {
        self.positions.get(id.index()).copied().flatten()
    }

    pub fn set(&mut self, id: VertexId, at: Point2<f32>) {
        let index = id.index();
        if index >= self.positions.len() {
            self.positions.resize(index + 1, None);
        }
        self.positions[index] = Some(at);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Label text for a vertex position
pub fn coordinate_label(x: f32, y: f32, z: f32) -> String {
    format!("({:.2}, {:.2}, {:.2})", x, y, z)
}

/// Full-mesh redraw driver
#[derive(Debug, Default)]
pub struct Renderer {
    anchors: ScreenAnchors,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchors(&self) -> &ScreenAnchors {
        &self.anchors
    }

    /// Recompute every vertex's current position and screen anchor
    pub fn project(&mut self, mesh: &mut Mesh, rotation: &RotationState, camera: &Camera) {
        self.anchors.clear();
        mesh.update_positions(rotation);

        for vertex in mesh.vertices() {
            match camera.project_to_screen(&vertex.current, rotation.z) {
                Some(at) => self.anchors.set(vertex.id, at),
                None => {
                    tracing::warn!(vertex = %vertex.id, z = vertex.current.z, "vertex sits on the eye plane");
                }
            }
        }
    }

    /// Recompute every vertex and redraw points, labels and edges
    pub fn redraw<C: Canvas>(
        &mut self,
        mesh: &mut Mesh,
        rotation: &RotationState,
        camera: &Camera,
        canvas: &mut C,
    ) {
        self.project(mesh, rotation, camera);
        canvas.clear();

        let offset = Vector2::new(LABEL_OFFSET.0, LABEL_OFFSET.1);
        for vertex in mesh.vertices() {
            let Some(at) = self.anchors.get(vertex.id) else {
                continue;
            };
            canvas.draw_point(at);
            let initial = vertex.initial;
            canvas.draw_label(at + offset, &coordinate_label(initial.x, initial.y, initial.z));
        }

        for edge in mesh.edges() {
            if let (Some(from), Some(to)) = (self.anchors.get(edge.a), self.anchors.get(edge.b)) {
                canvas.draw_line(from, to, Stroke::Edge);
            }
        }
    }
}
