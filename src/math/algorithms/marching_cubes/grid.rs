// src/math/algorithms/marching_cubes/grid.rs

use super::mesh::IsoMesh;
use super::voxel::Voxel;
use crate::math::error::{MathError, MathResult};
use crate::math::scalar_field::ScalarField3D;
use crate::math::types::{Bounds3D, UVec3};
use bevy::math::Vec3;

/// Dichtes, kubisches Voxelgitter über einer Bounding Box.
/// Die Voxel liegen in row-major Reihenfolge (x läuft am schnellsten).
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    resolution: usize,
    bounds: Bounds3D,
    cell_size: Vec3,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Baut das Gitter mit `resolution` Zellen pro Achse über `bounds` auf.
    /// Die Zellgröße ergibt sich pro Achse aus `bounds.size() / resolution`.
    pub fn new(resolution: usize, bounds: Bounds3D) -> MathResult<Self> {
        // 3D-Indizes werden als `u32` gespeichert, `resolution³` muss in `usize` passen
        let cell_count = resolution
            .checked_pow(3)
            .filter(|_| resolution > 0 && u32::try_from(resolution).is_ok())
            .ok_or(MathError::InvalidResolution { resolution })?;
        if bounds.is_empty() || bounds.size().min_element() <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Grid bounds must have a positive volume, got {}", bounds),
            });
        }

        let cell_size = bounds.size() / resolution as f32;
        let mut grid = Self {
            resolution,
            bounds,
            cell_size,
            voxels: Vec::new(),
        };

        grid.voxels = (0..cell_count)
            .map(|i| Voxel::new(grid.cell_center(grid.i1_to_i3(i)), cell_size))
            .collect();

        Ok(grid)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn bounds(&self) -> Bounds3D {
        self.bounds
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn voxel(&self, index: usize) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    /// Linearer Index -> 3D-Index `(x, y, z)`.
    #[inline]
    pub fn i1_to_i3(&self, index: usize) -> UVec3 {
        let res = self.resolution;
        UVec3::new(
            (index % res) as u32,
            ((index % (res * res)) / res) as u32,
            (index / (res * res)) as u32,
        )
    }

    /// 3D-Index -> linearer Index. Umkehrung von `i1_to_i3`.
    #[inline]
    pub fn i3_to_i1(&self, index: UVec3) -> usize {
        let res = self.resolution;
        index.x as usize + index.y as usize * res + index.z as usize * res * res
    }

    /// Weltposition des Zellzentrums: `origin + index * cell_size + cell_size / 2`.
    pub fn cell_center(&self, index: UVec3) -> Vec3 {
        self.bounds.min + index.as_vec3() * self.cell_size + self.cell_size * 0.5
    }

    /// Sampelt alle Ecken und Zentren neu.
    pub fn sample<F: ScalarField3D + ?Sized>(&mut self, field: &F) {
        for voxel in self.voxels.iter_mut() {
            voxel.sample(field);
        }
    }

    /// Polygonisiert alle Voxel in linearer Index-Reihenfolge zu einem Mesh.
    pub fn polygonize<F: ScalarField3D + ?Sized>(&self, field: &F, isolevel: f32) -> IsoMesh {
        let mut mesh = IsoMesh::new();
        for voxel in &self.voxels {
            voxel.polygonize_into(field, isolevel, &mut mesh);
        }
        mesh
    }

    /// Ein kompletter Durchlauf: erst sampeln, dann polygonisieren.
    pub fn tick<F: ScalarField3D + ?Sized>(&mut self, field: &F, isolevel: f32) -> IsoMesh {
        self.sample(field);
        self.polygonize(field, isolevel)
    }

    /// Anzahl der Voxel, die von der Isofläche geschnitten werden.
    pub fn active_voxel_count(&self, isolevel: f32) -> usize {
        self.voxels
            .iter()
            .map(|voxel| voxel.configuration(isolevel))
            .filter(|&config| config != 0 && config != u8::MAX)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::constants::SQRT_3;
    use approx::assert_relative_eq;

    fn cube_grid(resolution: usize, extent: f32) -> VoxelGrid {
        let bounds = Bounds3D::from_dimensions(extent, extent, extent).unwrap();
        VoxelGrid::new(resolution, bounds).unwrap()
    }

    #[test]
    fn test_invalid_resolution() {
        let bounds = Bounds3D::from_dimensions(1.0, 1.0, 1.0).unwrap();
        assert_eq!(
            VoxelGrid::new(0, bounds).unwrap_err(),
            MathError::InvalidResolution { resolution: 0 }
        );
    }

    #[test]
    fn test_overflowing_resolution_is_rejected() {
        let bounds = Bounds3D::from_dimensions(1.0, 1.0, 1.0).unwrap();
        for resolution in [3_000_000, usize::MAX] {
            assert_eq!(
                VoxelGrid::new(resolution, bounds).unwrap_err(),
                MathError::InvalidResolution { resolution }
            );
        }
    }

    #[test]
    fn test_index_bijection() {
        for res in [1, 2, 3, 7] {
            let grid = cube_grid(res, 1.0);
            assert_eq!(grid.len(), res * res * res);
            for i in 0..grid.len() {
                let i3 = grid.i1_to_i3(i);
                assert!(i3.max_element() < res as u32);
                assert_eq!(grid.i3_to_i1(i3), i);
            }
            for z in 0..res as u32 {
                for y in 0..res as u32 {
                    for x in 0..res as u32 {
                        let i3 = UVec3::new(x, y, z);
                        assert_eq!(grid.i1_to_i3(grid.i3_to_i1(i3)), i3);
                    }
                }
            }
        }
    }

    #[test]
    fn test_row_major_layout() {
        let grid = cube_grid(4, 4.0);
        assert_eq!(grid.i1_to_i3(1), UVec3::new(1, 0, 0));
        assert_eq!(grid.i1_to_i3(4), UVec3::new(0, 1, 0));
        assert_eq!(grid.i1_to_i3(16), UVec3::new(0, 0, 1));
        assert_eq!(grid.i1_to_i3(63), UVec3::new(3, 3, 3));
    }

    #[test]
    fn test_cell_centers() {
        let bounds = Bounds3D::from_dimensions(10.0, 20.0, 40.0).unwrap();
        let grid = VoxelGrid::new(10, bounds).unwrap();
        assert_eq!(grid.cell_size(), Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(grid.cell_center(UVec3::ZERO), Vec3::new(0.5, 1.0, 2.0));
        assert_eq!(grid.cell_center(UVec3::new(9, 9, 9)), Vec3::new(9.5, 19.0, 38.0));

        let voxel = grid.voxel(grid.i3_to_i1(UVec3::new(2, 3, 4))).unwrap();
        assert_eq!(voxel.center().position(), Vec3::new(2.5, 7.0, 18.0));
        assert_eq!(voxel.size(), grid.cell_size());
        assert!(grid.voxel(grid.len()).is_none());
    }

    #[test]
    fn test_zero_field_produces_no_mesh() {
        let mut grid = cube_grid(6, 6.0);
        let field = |_: Vec3| 0.0_f32;
        let mesh = grid.tick(&field, 0.5);
        assert!(mesh.is_empty());
        assert_eq!(grid.active_voxel_count(0.5), 0);
    }

    #[test]
    fn test_sphere_field() {
        let mut grid = cube_grid(12, 12.0);
        let center = Vec3::splat(6.0);
        let radius = 4.0;
        let field = move |p: Vec3| radius - p.distance(center);
        let mesh = grid.tick(&field, 0.0);

        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.vertices().len(), mesh.normals().len());
        assert_eq!(mesh.vertex_count() % 3, 0);
        assert!(grid.active_voxel_count(0.0) > 0);

        let diagonal = grid.cell_size().x * SQRT_3;
        for (vertex, normal) in mesh.vertices().iter().zip(mesh.normals()) {
            let distance = vertex.distance(center);
            assert!((distance - radius).abs() <= diagonal);
            // Feld fällt nach außen ab -> Gradient zeigt zum Zentrum
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-4);
            assert!(normal.dot(center - *vertex) > 0.0);
        }
    }
}
