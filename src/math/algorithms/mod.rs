// src/math/algorithms/mod.rs

// Isoflächen-Extraktion und die Felder, auf denen sie arbeitet
pub mod marching_cubes;
pub mod metaballs;

pub use self::marching_cubes::{IsoMesh, IsoTriangle, SamplePoint, Voxel, VoxelGrid};
pub use self::metaballs::{
    InitialPlacement, Metaball, MetaballField, MetaballFieldBuilder, MetaballSnapshot, Polarity,
};
