/// Wireframe mesh: vertices with stable ids and the edges between them
use std::f32::consts::TAU;
use std::fmt;

use nalgebra::{Point2, Point3};

use crate::error::{EditorError, Result};
use crate::render::ScreenAnchors;
use crate::transform::{RotationState, Transform};

/// Stable vertex identifier, equal to the vertex's insertion index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wireframe vertex.
///
/// `initial` is fixed at creation; `current` is rewritten by every redraw from
/// `initial` and the rotation state.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub id: VertexId,
    pub initial: Point3<f32>,
    pub current: Point3<f32>,
}

impl Vertex {
    fn new(id: VertexId, position: Point3<f32>) -> Self {
        Self {
            id,
            initial: position,
            current: position,
        }
    }
}

/// An edge between two vertices of the same mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
}

impl Edge {
    pub fn indices(&self) -> (usize, usize) {
        (self.a.index(), self.b.index())
    }
}

/// A 3D wireframe composed of vertices and edges
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Build a mesh from a vertex list and an edge list of index pairs
    pub fn from_lists(vertices: &[[f32; 3]], edges: &[(usize, usize)]) -> Result<Self> {
        let mut mesh = Self::with_capacity(vertices.len(), edges.len());
        for &[x, y, z] in vertices {
            mesh.add_vertex(x, y, z);
        }
        for (edge, &(a, b)) in edges.iter().enumerate() {
            let count = mesh.vertices.len();
            for vertex in [a, b] {
                if vertex >= count {
                    return Err(EditorError::DanglingEdge {
                        edge,
                        vertex,
                        count,
                    });
                }
            }
            mesh.edges.push(Edge {
                a: VertexId(a),
                b: VertexId(b),
            });
        }
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(id, Point3::new(x, y, z)));
        id
    }

    /// Connect two vertices. Self edges and duplicates are accepted.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<Edge> {
        for id in [a, b] {
            if self.vertex(id).is_none() {
                return Err(EditorError::UnknownVertex(id.0));
            }
        }
        let edge = Edge { a, b };
        self.edges.push(edge);
        Ok(edge)
    }

    /// Edge list as index pairs, in creation order
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(Edge::indices).collect()
    }

    /// Recompute every vertex's current position from its initial one
    pub fn update_positions(&mut self, rotation: &RotationState) {
        for vertex in &mut self.vertices {
            vertex.current = Transform::apply(rotation, &vertex.initial);
        }
    }

    /// First vertex, in insertion order, whose screen anchor lies within
    /// `tolerance` of `point` on both axes
    pub fn vertex_near(
        &self,
        anchors: &ScreenAnchors,
        point: &Point2<f32>,
        tolerance: f32,
    ) -> Option<VertexId> {
        self.vertices.iter().map(|v| v.id).find(|&id| {
            anchors.get(id).is_some_and(|anchor| {
                (anchor.x - point.x).abs() <= tolerance && (anchor.y - point.y).abs() <= tolerance
            })
        })
    }

    /// Torus wireframe: `rings` loops around the hole, each with `sides` vertices
    pub fn donut(major_radius: f32, minor_radius: f32, rings: usize, sides: usize) -> Self {
        let mut mesh = Self::with_capacity(rings * sides, rings * sides * 2);
        if rings == 0 || sides == 0 {
            return mesh;
        }

        for ring in 0..rings {
            let theta = TAU * ring as f32 / rings as f32;
            for side in 0..sides {
                let phi = TAU * side as f32 / sides as f32;
                let radius = major_radius + minor_radius * phi.cos();
                mesh.add_vertex(
                    radius * theta.cos(),
                    radius * theta.sin(),
                    minor_radius * phi.sin(),
                );
            }
        }

        let at = |ring: usize, side: usize| VertexId((ring % rings) * sides + side % sides);
        for ring in 0..rings {
            for side in 0..sides {
                mesh.edges.push(Edge {
                    a: at(ring, side),
                    b: at(ring, side + 1),
                });
                mesh.edges.push(Edge {
                    a: at(ring, side),
                    b: at(ring + 1, side),
                });
            }
        }

        mesh
    }

    /// Create a simple cube wireframe for testing
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.add_vertex(x, y, z);
        }

        for &(a, b) in &[
            // Back face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Front face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Struts
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ] {
            mesh.edges.push(Edge {
                a: VertexId(a),
                b: VertexId(b),
            });
        }

        mesh
    }
}
