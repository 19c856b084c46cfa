// src/math/algorithms/metaballs/builder.rs

use super::{
    field::MetaballField,
    metaball::{Metaball, Polarity},
};
use crate::math::error::{MathError, MathResult};
use crate::math::types::Bounds3D;
use crate::math::utils::constants;
use bevy::log::debug;
use bevy::math::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Startposition der zufällig erzeugten Metaballs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum InitialPlacement {
    /// Alle Metaballs starten im Zentrum der Bounding Box.
    #[default]
    Center,
    /// Alle Metaballs starten an derselben festen Position.
    Fixed { x: f32, y: f32, z: f32 },
    /// Gleichverteilt innerhalb der Bewegungsgrenzen.
    Random,
}

/// Builder zum komfortablen Erstellen und Konfigurieren von `MetaballField`-Instanzen.
#[derive(Debug, Clone)]
pub struct MetaballFieldBuilder {
    bounds: Bounds3D,
    margin: f32,
    count: usize,
    min_radius: f32,
    max_radius: f32,
    max_speed: f32,
    placement: InitialPlacement,
    seed: Option<u64>,
    metaballs: Vec<Metaball>,
}

impl Default for MetaballFieldBuilder {
    fn default() -> Self {
        Self {
            bounds: Bounds3D {
                min: Vec3::ZERO,
                max: Vec3::splat(20.0),
            },
            margin: constants::BOUNDARY_MARGIN,
            count: 0,
            min_radius: 1.0,
            max_radius: 2.0,
            max_speed: 0.1,
            placement: InitialPlacement::default(),
            seed: None,
            metaballs: Vec::new(),
        }
    }
}

impl MetaballFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: Bounds3D) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Anzahl zufällig erzeugter Metaballs (zusätzlich zu `add_metaball`).
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn radius_range(mut self, min_radius: f32, max_radius: f32) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    /// Maximale Geschwindigkeit pro Achse.
    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn placement(mut self, placement: InitialPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Fester Seed für reproduzierbare Läufe. `None` zieht einen Seed aus dem Thread-RNG.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Fügt einen explizit konfigurierten Metaball hinzu.
    pub fn add_metaball(mut self, metaball: Metaball) -> Self {
        self.metaballs.push(metaball);
        self
    }

    fn validate(&self) -> MathResult<()> {
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
        if self.count > 0 && self.bounds.shrink(self.margin).is_empty() {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Margin {} leaves no room for metaballs inside {}",
                    self.margin, self.bounds
                ),
            });
        }
        Ok(())
    }

    fn start_position(&self, rng: &mut StdRng) -> Vec3 {
        match self.placement {
            InitialPlacement::Center => self.bounds.center(),
            InitialPlacement::Fixed { x, y, z } => Vec3::new(x, y, z),
            InitialPlacement::Random => {
                let motion = self.bounds.shrink(self.margin);
                Vec3::new(
                    rng.random_range(motion.min.x..=motion.max.x),
                    rng.random_range(motion.min.y..=motion.max.y),
                    rng.random_range(motion.min.z..=motion.max.z),
                )
            }
        }
    }

    fn random_metaball(&self, rng: &mut StdRng) -> MathResult<Metaball> {
        let position = self.start_position(rng);
        let speed = self.max_speed;
        let velocity = Vec3::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        );
        let radius = rng.random_range(self.min_radius..=self.max_radius);
        let polarity = if rng.random_bool(constants::POSITIVE_POLARITY_PROBABILITY) {
            Polarity::Positive
        } else {
            Polarity::Negative
        };
        Metaball::new(position, radius, velocity, polarity)
    }

    pub fn build(self) -> MathResult<MetaballField> {
        self.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        let mut metaballs = self.metaballs.clone();
        metaballs.reserve(self.count);
        for _ in 0..self.count {
            metaballs.push(self.random_metaball(&mut rng)?);
        }

        debug!(
            "Built metaball field with {} balls ({} random) in {}",
            metaballs.len(),
            self.count,
            self.bounds
        );

        Ok(MetaballField::new(metaballs, self.bounds, self.margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar_field::ScalarField3D;

    fn bounds() -> Bounds3D {
        Bounds3D::from_dimensions(20.0, 20.0, 20.0).unwrap()
    }

    #[test]
    fn test_random_metaballs_respect_ranges() {
        let field = MetaballFieldBuilder::new()
            .bounds(bounds())
            .count(200)
            .radius_range(1.5, 3.0)
            .max_speed(0.2)
            .seed(Some(42))
            .build()
            .unwrap();

        assert_eq!(field.len(), 200);
        for ball in field.metaballs() {
            assert!((1.5..=3.0).contains(&ball.radius()));
            assert!(ball.velocity.abs().max_element() <= 0.2);
            assert_eq!(ball.position(), Vec3::splat(10.0));
        }

        let positives = field
            .metaballs()
            .iter()
            .filter(|ball| ball.polarity == Polarity::Positive)
            .count();
        // 75 % positiv, großzügige Toleranz
        assert!((110..=185).contains(&positives), "positives: {positives}");
    }

    #[test]
    fn test_seed_is_deterministic() {
        let build = || {
            MetaballFieldBuilder::new()
                .bounds(bounds())
                .count(5)
                .placement(InitialPlacement::Random)
                .seed(Some(7))
                .build()
                .unwrap()
        };
        let a = build();
        let b = build();
        assert_eq!(a.metaballs(), b.metaballs());
        let point = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(a.sample(point), b.sample(point));
    }

    #[test]
    fn test_random_placement_inside_motion_bounds() {
        let field = MetaballFieldBuilder::new()
            .bounds(bounds())
            .count(50)
            .placement(InitialPlacement::Random)
            .seed(Some(3))
            .build()
            .unwrap();
        for ball in field.metaballs() {
            assert!(field.motion_bounds().contains_point(ball.position()));
        }
    }

    #[test]
    fn test_fixed_placement_and_explicit_balls() {
        let explicit =
            Metaball::new(Vec3::ONE * 4.0, 2.0, Vec3::ZERO, Polarity::Negative).unwrap();
        let field = MetaballFieldBuilder::new()
            .bounds(bounds())
            .add_metaball(explicit.clone())
            .count(2)
            .placement(InitialPlacement::Fixed {
                x: 3.0,
                y: 4.0,
                z: 5.0,
            })
            .seed(Some(1))
            .build()
            .unwrap();
        assert_eq!(field.len(), 3);
        assert_eq!(field.metaballs()[0], explicit);
        assert_eq!(field.metaballs()[1].position(), Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_invalid_ranges() {
        let err = MetaballFieldBuilder::new()
            .radius_range(3.0, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, MathError::InvalidRadiusRange { min: 3.0, max: 1.0 });

        assert!(
            MetaballFieldBuilder::new()
                .radius_range(0.0, 1.0)
                .build()
                .is_err()
        );
        assert!(MetaballFieldBuilder::new().max_speed(-1.0).build().is_err());
        assert!(
            MetaballFieldBuilder::new()
                .bounds(Bounds3D::from_dimensions(3.0, 3.0, 3.0).unwrap())
                .count(1)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_zero_speed_is_allowed() {
        let field = MetaballFieldBuilder::new()
            .bounds(bounds())
            .count(3)
            .max_speed(0.0)
            .seed(Some(9))
            .build()
            .unwrap();
        assert!(field.metaballs().iter().all(|ball| ball.velocity == Vec3::ZERO));
    }
}
