/// Pointer gesture state: dragging out new edges between vertices
use nalgebra::Point2;

use crate::error::Result;
use crate::mesh::{Edge, Mesh, VertexId};
use crate::render::ScreenAnchors;
use crate::transform::Axis;

/// Normalized input delivered by the front end, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    LeftClick(Point2<f32>),
    RightClick(Point2<f32>),
    Drag(Point2<f32>),
    Release(Point2<f32>),
    SliderChanged(Axis, f32),
}

/// Rubber band from the active vertex to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub from: Point2<f32>,
    pub to: Point2<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        active: VertexId,
        preview: PreviewLine,
    },
}

impl InteractionState {
    pub fn active_vertex(&self) -> Option<VertexId> {
        match self {
            Self::Idle => None,
            Self::Dragging { active, .. } => Some(*active),
        }
    }

    pub fn preview(&self) -> Option<&PreviewLine> {
        match self {
            Self::Idle => None,
            Self::Dragging { preview, .. } => Some(preview),
        }
    }

    /// Left button down. Starts a drag when a vertex is under the pointer,
    /// otherwise leaves the state alone.
    pub fn press(
        &mut self,
        mesh: &Mesh,
        anchors: &ScreenAnchors,
        at: Point2<f32>,
        tolerance: f32,
    ) -> Option<VertexId> {
        let active = mesh.vertex_near(anchors, &at, tolerance)?;
        let from = anchors.get(active).unwrap_or(at);
        *self = Self::Dragging {
            active,
            preview: PreviewLine { from, to: at },
        };
        Some(active)
    }

    /// Pointer moved with the button held; returns whether a preview is shown
    pub fn drag(&mut self, at: Point2<f32>) -> bool {
        match self {
            Self::Idle => false,
            Self::Dragging { preview, .. } => {
                preview.to = at;
                true
            }
        }
    }

    /// Left button up. Connects the active vertex to whatever vertex is under
    /// the pointer, the start vertex included, and always returns to idle.
    pub fn release(
        &mut self,
        mesh: &mut Mesh,
        anchors: &ScreenAnchors,
        at: Point2<f32>,
        tolerance: f32,
    ) -> Result<Option<Edge>> {
        let Self::Dragging { active, .. } = std::mem::take(self) else {
            return Ok(None);
        };
        match mesh.vertex_near(anchors, &at, tolerance) {
            Some(target) => mesh.add_edge(active, target).map(Some),
            None => Ok(None),
        }
    }
}
