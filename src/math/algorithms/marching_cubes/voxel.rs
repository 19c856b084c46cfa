// src/math/algorithms/marching_cubes/voxel.rs

use super::mesh::IsoMesh;
use super::tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, triangle_edges};
use crate::math::scalar_field::ScalarField3D;
use crate::math::utils::comparison;
use bevy::math::Vec3;

/// Ein Abtastpunkt im Gitter. Die Position ist nach der Erstellung fest,
/// der Wert wird in jedem Tick neu gesampelt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    position: Vec3,
    value: f32,
}

impl SamplePoint {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            value: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Zuletzt gesampelter Wert.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn sample<F: ScalarField3D + ?Sized>(&mut self, field: &F) {
        self.value = field.sample(self.position);
    }
}

/// Eine Gitterzelle: 8 Ecken + Zentrum.
/// Die Reihenfolge der Ecken folgt `CORNER_OFFSETS` und damit der Konvention der Lookup-Tabellen.
#[derive(Debug, Clone, PartialEq)]
pub struct Voxel {
    corners: [SamplePoint; 8],
    center: SamplePoint,
    size: Vec3,
}

impl Voxel {
    /// Erstellt eine Zelle um `center` mit den Kantenlängen `size`.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        let corners = CORNER_OFFSETS.map(|offset| {
            SamplePoint::new(center + Vec3::from_array(offset) * half_size)
        });
        Self {
            corners,
            center: SamplePoint::new(center),
            size,
        }
    }

    pub fn corners(&self) -> &[SamplePoint; 8] {
        &self.corners
    }

    pub fn center(&self) -> &SamplePoint {
        &self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Sampelt Zentrum und alle Ecken neu.
    pub fn sample<F: ScalarField3D + ?Sized>(&mut self, field: &F) {
        self.center.sample(field);
        for corner in self.corners.iter_mut() {
            corner.sample(field);
        }
    }

    /// 8-Bit-Konfiguration: Bit `i` gesetzt, wenn Ecke `i` über dem Isowert liegt.
    pub fn configuration(&self, isolevel: f32) -> u8 {
        self.corners
            .iter()
            .enumerate()
            .filter(|(_, corner)| corner.value > isolevel)
            .fold(0u8, |config, (i, _)| config | (1 << i))
    }

    /// Schnittpunkt der Isofläche mit Kante `edge`.
    /// `t` wird auf [0, 1] geklemmt, flache Kanten liefern den Mittelpunkt.
    fn interpolate_edge(&self, edge: usize, isolevel: f32) -> Vec3 {
        let [a, b] = EDGE_CORNERS[edge];
        let (corner_a, corner_b) = (&self.corners[a], &self.corners[b]);
        let t = comparison::inverse_lerp_clamped(corner_a.value, corner_b.value, isolevel);
        corner_a.position.lerp(corner_b.position, t)
    }

    /// Polygonisiert die Zelle gegen `isolevel` und hängt die Dreiecke an `mesh` an.
    /// Erwartet, dass `sample` für den aktuellen Tick bereits gelaufen ist.
    pub fn polygonize_into<F: ScalarField3D + ?Sized>(
        &self,
        field: &F,
        isolevel: f32,
        mesh: &mut IsoMesh,
    ) {
        let configuration = self.configuration(isolevel);
        if configuration == 0 {
            return;
        }

        let edge_mask = EDGE_TABLE[configuration as usize];
        if edge_mask == 0 {
            return;
        }

        let mut edge_points: [Option<Vec3>; 12] = [None; 12];
        for (edge, point) in edge_points.iter_mut().enumerate() {
            if edge_mask & (1 << edge) != 0 {
                *point = Some(self.interpolate_edge(edge, isolevel));
            }
        }

        for triangle in triangle_edges(configuration).chunks_exact(3) {
            let mut vertices = [Vec3::ZERO; 3];
            for (vertex, &edge) in vertices.iter_mut().zip(triangle) {
                // Die Tabellen referenzieren nur geschnittene Kanten
                *vertex = edge_points[edge as usize]
                    .unwrap_or_else(|| self.interpolate_edge(edge as usize, isolevel));
            }
            let normals = vertices.map(|vertex| field.normal_at(vertex));
            mesh.push_triangle(vertices, normals);
        }
    }

    pub fn polygonize<F: ScalarField3D + ?Sized>(&self, field: &F, isolevel: f32) -> IsoMesh {
        let mut mesh = IsoMesh::new();
        self.polygonize_into(field, isolevel, &mut mesh);
        mesh
    }
}
