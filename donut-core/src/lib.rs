/// Donut Core Library - Wireframe editing under a rotating perspective view
/// 
/// This library provides the projection math, the wireframe model, the pointer
/// gesture state machine and the redraw driver. Front ends feed it input events
/// and implement `Canvas` to receive draw commands.

pub mod error;
pub mod transform;
pub mod projection;
pub mod mesh;
pub mod render;
pub mod interaction;
pub mod editor;
pub mod wire;

// Re-export commonly used types
pub use error::{EditorError, Result};
pub use mesh::{Edge, Mesh, Vertex, VertexId};
pub use transform::{Axis, RotationState, Transform};
pub use projection::{Camera, DEFAULT_DISTANCE};
pub use render::{Canvas, DrawCommand, Renderer, ScreenAnchors, Stroke};
pub use interaction::{InputEvent, InteractionState, PreviewLine};
pub use editor::{Editor, EditorConfig, MeshChange, DEFAULT_HIT_TOLERANCE};
