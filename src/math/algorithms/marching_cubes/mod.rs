// src/math/algorithms/marching_cubes/mod.rs

pub mod grid;
pub mod mesh;
pub mod tables;
pub mod voxel;

pub use self::grid::VoxelGrid;
pub use self::mesh::{IsoMesh, IsoTriangle};
pub use self::voxel::{SamplePoint, Voxel};
