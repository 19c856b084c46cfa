// src/math/algorithms/marching_cubes/mesh.rs

use crate::math::types::Bounds3D;
use bevy::math::Vec3;

/// Ein einzelnes Dreieck der Isofläche mit Vertex-Normalen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoTriangle {
    pub vertices: [Vec3; 3],
    pub normals: [Vec3; 3],
}

/// Ergebnis einer Extraktion: parallele Listen von Positionen und Normalen.
/// Je drei aufeinanderfolgende Vertices bilden ein Dreieck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoMesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl IsoMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_triangle_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
            normals: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn push_triangle(&mut self, vertices: [Vec3; 3], normals: [Vec3; 3]) {
        self.vertices.extend_from_slice(&vertices);
        self.normals.extend_from_slice(&normals);
        debug_assert_eq!(self.vertices.len(), self.normals.len());
    }

    /// Hängt alle Dreiecke von `other` an und leert `other`.
    pub fn append(&mut self, other: &mut IsoMesh) {
        self.vertices.append(&mut other.vertices);
        self.normals.append(&mut other.normals);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = IsoTriangle> + '_ {
        self.vertices
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(v, n)| IsoTriangle {
                vertices: [v[0], v[1], v[2]],
                normals: [n[0], n[1], n[2]],
            })
    }

    /// Umschließende Box aller Vertices, `None` für ein leeres Mesh.
    pub fn bounds(&self) -> Option<Bounds3D> {
        Bounds3D::from_points_iter(self.vertices.iter().copied())
    }
}
