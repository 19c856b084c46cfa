use crate::math::algorithms::metaballs::InitialPlacement;
use crate::math::error::{MathError, MathResult};
use crate::math::types::Bounds3D;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Konfiguration der Isoflächen-Simulation.
/// Änderungen an Auflösung oder Box führen immer zu einem kompletten Neuaufbau.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Gitter ---
    pub resolution: usize,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Empfohlen ca. 0.5 - 2.0
    pub isolevel: f32,

    // --- Metaballs ---
    /// Für interaktive Raten nicht mehr als ~10
    pub metaball_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub max_speed: f32,
    pub placement: InitialPlacement,
    pub seed: Option<u64>,

    // --- Zeitsteuerung ---
    pub time_step: f32,
    pub start_paused: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Gitter
            resolution: 24,
            width: 24.0,
            height: 24.0,
            depth: 24.0,
            isolevel: 1.3,

            // Metaballs
            metaball_count: 5,
            min_radius: 1.5,
            max_radius: 3.0,
            max_speed: 0.15,
            placement: InitialPlacement::Center,
            seed: None,

            // Zeit
            time_step: 1.0,
            start_paused: false,
        }
    }
}

impl EngineConfig {
    pub fn bounds(&self) -> MathResult<Bounds3D> {
        Bounds3D::from_dimensions(self.width, self.height, self.depth)
    }

    /// Prüft alle Parameter, bevor Feld und Gitter neu aufgebaut werden.
    pub fn validate(&self) -> MathResult<()> {
        if self.resolution == 0 {
            return Err(MathError::InvalidResolution {
                resolution: self.resolution,
            });
        }
        self.bounds()?;
        if !self.isolevel.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("isolevel must be finite, got {}", self.isolevel),
            });
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return Err(MathError::InvalidRadius {
                radius: self.min_radius,
            });
        }
        if !self.max_radius.is_finite() || self.min_radius > self.max_radius {
            return Err(MathError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("max_speed must be finite and >= 0, got {}", self.max_speed),
            });
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("time_step must be positive, got {}", self.time_step),
            });
        }
        Ok(())
    }

    /// Unterscheiden sich die beiden Konfigurationen nur im Isowert?
    /// Dann reicht es, den Isowert zu übernehmen, ohne neu aufzubauen.
    pub fn differs_only_in_isolevel(&self, other: &EngineConfig) -> bool {
        let mut normalized = other.clone();
        normalized.isolevel = self.isolevel;
        normalized == *self && self.isolevel != other.isolevel
    }
}
