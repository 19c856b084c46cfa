// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid grid resolution: {resolution} (must be at least 1 and resolution³ must fit in usize)")]
    InvalidResolution { resolution: usize },

    #[error("Invalid radius: {radius} (must be positive and finite)")]
    InvalidRadius { radius: f32 },

    #[error("Invalid radius range: min {min} > max {max}")]
    InvalidRadiusRange { min: f32, max: f32 },

    #[error("Invalid bounds: min {min:?} > max {max:?}")]
    InvalidBounds { min: [f32; 3], max: [f32; 3] },
}

pub type MathResult<T> = Result<T, MathError>;
