// src/math/algorithms/metaballs/mod.rs

pub mod builder;
pub mod field;
pub mod metaball;

pub use self::builder::{InitialPlacement, MetaballFieldBuilder};
pub use self::field::MetaballField;
pub use self::metaball::{Metaball, MetaballSnapshot, Polarity};
