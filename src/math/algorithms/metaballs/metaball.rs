// src/math/algorithms/metaballs/metaball.rs

use crate::math::error::{MathError, MathResult};
use crate::math::utils::constants;
use bevy::math::Vec3;

/// Vorzeichen des Einflusses eines Metaballs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Additiver Einfluss (+1)
    Positive,
    /// Subtraktiver Einfluss (-1), "frisst" Löcher in die Oberfläche
    Negative,
}

impl Polarity {
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// Ein bewegter Metaball als Einflussquelle des Skalarfeldes.
/// Einfluss an einem Punkt: `sign * r² / d²`.
#[derive(Debug, Clone, PartialEq)]
pub struct Metaball {
    position: Vec3,
    radius: f32,
    radius_sq: f32,
    pub velocity: Vec3,
    pub polarity: Polarity,
}

impl Metaball {
    /// Erstellt einen neuen Metaball. Der Radius muss positiv und endlich sein.
    pub fn new(
        position: Vec3,
        radius: f32,
        velocity: Vec3,
        polarity: Polarity,
    ) -> MathResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MathError::InvalidRadius { radius });
        }
        Ok(Self {
            position,
            radius,
            radius_sq: radius * radius,
            velocity,
            polarity,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_sq(&self) -> f32 {
        self.radius_sq
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Einfluss an `point`. Das Abstandsquadrat wird nach unten auf
    /// `MIN_DISTANCE_SQ` begrenzt, damit das Zentrum selbst einen endlichen Wert liefert.
    #[inline]
    pub fn influence_at(&self, point: Vec3) -> f32 {
        let distance_sq = self
            .position
            .distance_squared(point)
            .max(constants::MIN_DISTANCE_SQ);
        self.polarity.sign() * self.radius_sq / distance_sq
    }

    /// Radius der Isofläche eines einzelnen, positiven Metaballs: `r / sqrt(isolevel)`.
    /// `None` für nicht-positive Isowerte.
    pub fn iso_radius(&self, isolevel: f32) -> Option<f32> {
        (isolevel > 0.0).then(|| self.radius / isolevel.sqrt())
    }

    pub fn snapshot(&self) -> MetaballSnapshot {
        MetaballSnapshot {
            position: self.position,
            radius: self.radius,
            polarity: self.polarity,
        }
    }
}

/// Read-only Zustand eines Metaballs für externe Visualisierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaballSnapshot {
    pub position: Vec3,
    pub radius: f32,
    pub polarity: Polarity,
}
