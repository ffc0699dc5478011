/// Editor facade: owns the wireframe, the view and the gesture state
use nalgebra::Point2;

use crate::error::{EditorError, Result};
use crate::interaction::{InputEvent, InteractionState};
use crate::mesh::{Edge, Mesh, VertexId};
use crate::projection::{Camera, DEFAULT_DISTANCE};
use crate::render::{Canvas, Renderer, Stroke};
use crate::transform::{Axis, RotationState};

/// Default hit-test tolerance, in pixels on each axis
pub const DEFAULT_HIT_TOLERANCE: f32 = 5.0;

/// Editor settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    pub distance: f32,
    pub hit_tolerance: f32,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EditorError::InvalidConfig(format!(
                "canvas size {}x{} is empty",
                self.width, self.height
            )));
        }
        if !(self.distance.is_finite() && self.distance > 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "eye distance must be positive, got {}",
                self.distance
            )));
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "hit tolerance must not be negative, got {}",
                self.hit_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            distance: DEFAULT_DISTANCE,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

/// Mesh mutation caused by an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshChange {
    VertexAdded(VertexId),
    EdgeAdded(Edge),
}

/// Interactive wireframe editor
pub struct Editor {
    mesh: Mesh,
    rotation: RotationState,
    camera: Camera,
    renderer: Renderer,
    state: InteractionState,
    hit_tolerance: f32,
}

impl Editor {
    pub fn new(mesh: Mesh, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let mut editor = Self {
            mesh,
            rotation: RotationState::zero(),
            camera: Camera::new(config.width, config.height).with_distance(config.distance),
            renderer: Renderer::new(),
            state: InteractionState::Idle,
            hit_tolerance: config.hit_tolerance,
        };
        // Vertices are hittable before the first frame is drawn
        editor
            .renderer
            .project(&mut editor.mesh, &editor.rotation, &editor.camera);
        Ok(editor)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Screen position of a vertex as of the last redraw
    pub fn screen_position(&self, id: VertexId) -> Option<Point2<f32>> {
        self.renderer.anchors().get(id)
    }

    pub fn resize<C: Canvas>(&mut self, width: u32, height: u32, canvas: &mut C) {
        self.camera.resize(width, height);
        self.redraw(canvas);
    }

    /// Full redraw of the mesh plus any in-progress preview line
    pub fn redraw<C: Canvas>(&mut self, canvas: &mut C) {
        self.renderer
            .redraw(&mut self.mesh, &self.rotation, &self.camera, canvas);
        if let Some(preview) = self.state.preview() {
            canvas.draw_line(preview.from, preview.to, Stroke::Preview);
        }
    }

    /// Apply one input event and redraw
    pub fn handle<C: Canvas>(&mut self, event: InputEvent, canvas: &mut C) -> Result<Option<MeshChange>> {
        let change = match event {
            InputEvent::LeftClick(at) => {
                if let Some(active) = self.state.press(&self.mesh, self.renderer.anchors(), at, self.hit_tolerance) {
                    tracing::debug!(vertex = %active, "drag started");
                }
                None
            }
            InputEvent::RightClick(at) => Some(MeshChange::VertexAdded(self.add_vertex_at(at))),
            InputEvent::Drag(at) => {
                self.state.drag(at);
                None
            }
            InputEvent::Release(at) => {
                let edge = self
                    .state
                    .release(&mut self.mesh, self.renderer.anchors(), at, self.hit_tolerance)?;
                match edge {
                    Some(edge) => {
                        tracing::info!(
                            edge = ?edge.indices(),
                            connections = ?self.mesh.edge_indices(),
                            "edge created"
                        );
                        Some(MeshChange::EdgeAdded(edge))
                    }
                    None => {
                        tracing::debug!("drag released away from any vertex");
                        None
                    }
                }
            }
            InputEvent::SliderChanged(axis, degrees) => {
                self.set_rotation(axis, degrees);
                None
            }
        };
        self.redraw(canvas);
        Ok(change)
    }

    fn set_rotation(&mut self, axis: Axis, degrees: f32) {
        self.rotation.set(axis, degrees);
        tracing::debug!(?axis, angle = self.rotation.angle(axis), "rotation changed");
    }

    fn add_vertex_at(&mut self, at: Point2<f32>) -> VertexId {
        let active_z = self
            .state
            .active_vertex()
            .and_then(|id| self.mesh.vertex(id))
            .map(|vertex| vertex.initial.z);
        let world = self.camera.unproject_from_screen(&at, &self.rotation, active_z);
        let id = self.mesh.add_vertex(world.x, world.y, world.z);
        tracing::info!(vertex = %id, x = world.x, y = world.y, z = world.z, "vertex added");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommand;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_validation() {
        assert!(EditorConfig::default().validate().is_ok());

        let bad = [
            EditorConfig { width: 0, ..Default::default() },
            EditorConfig { distance: 0.0, ..Default::default() },
            EditorConfig { distance: f32::NAN, ..Default::default() },
            EditorConfig { hit_tolerance: -1.0, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(
                Editor::new(Mesh::new(), config),
                Err(EditorError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_slider_rotates_and_redraws() {
        let mesh = Mesh::from_lists(&[[100.0, 0.0, 0.0]], &[]).unwrap();
        let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
        let mut canvas = Vec::new();

        editor.handle(InputEvent::SliderChanged(Axis::Z, 405.0), &mut canvas).unwrap();

        assert_relative_eq!(editor.rotation().z, 45.0, epsilon = 1e-4);
        assert_eq!(canvas.first(), Some(&DrawCommand::Clear));
        let current = editor.mesh().vertices()[0].current;
        assert_relative_eq!(current.x, current.y, epsilon = 1e-3);
    }

    #[test]
    fn test_preview_is_drawn_while_dragging() {
        let mesh = Mesh::from_lists(&[[0.0, 0.0, 0.0]], &[]).unwrap();
        let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
        let mut canvas = Vec::new();
        editor.redraw(&mut canvas);

        editor.handle(InputEvent::LeftClick(Point2::new(251.0, 249.0)), &mut canvas).unwrap();
        canvas.clear();
        editor.handle(InputEvent::Drag(Point2::new(300.0, 320.0)), &mut canvas).unwrap();

        assert_eq!(
            canvas.last(),
            Some(&DrawCommand::Line(
                Point2::new(250.0, 250.0),
                Point2::new(300.0, 320.0),
                Stroke::Preview
            ))
        );
    }

    #[test]
    fn test_right_click_while_dragging_uses_active_depth() {
        let mesh = Mesh::from_lists(&[[0.0, 0.0, 0.0], [50.0, 0.0, 30.0]], &[]).unwrap();
        let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
        let mut canvas = Vec::new();
        editor.redraw(&mut canvas);

        let anchor = editor.screen_position(VertexId::from_index(1)).unwrap();
        editor.handle(InputEvent::LeftClick(anchor), &mut canvas).unwrap();
        let change = editor
            .handle(InputEvent::RightClick(Point2::new(250.0, 250.0)), &mut canvas)
            .unwrap();

        let Some(MeshChange::VertexAdded(id)) = change else {
            panic!("expected a new vertex, got {change:?}");
        };
        assert_relative_eq!(editor.mesh().vertex(id).unwrap().initial.z, 30.0);
        assert_eq!(editor.state().active_vertex(), Some(VertexId::from_index(1)));
    }

    #[test]
    fn test_resize_moves_projection_center() {
        let mesh = Mesh::from_lists(&[[0.0, 0.0, 0.0]], &[]).unwrap();
        let mut editor = Editor::new(mesh, EditorConfig::default()).unwrap();
        let mut canvas = Vec::new();

        editor.resize(800, 600, &mut canvas);

        assert_eq!(editor.screen_position(VertexId::from_index(0)), Some(Point2::new(400.0, 300.0)));
    }
}
