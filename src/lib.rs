pub mod math;
pub mod physics;
