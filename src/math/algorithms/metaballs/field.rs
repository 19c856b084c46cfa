// src/math/algorithms/metaballs/field.rs

use super::metaball::{Metaball, MetaballSnapshot};
use crate::math::scalar_field::ScalarField3D;
use crate::math::types::Bounds3D;
use bevy::math::Vec3;

/// Skalarfeld aus der Summe der Einflüsse aller Metaballs.
/// Besitzt die Metaballs exklusiv und bewegt sie innerhalb einer reflektierenden Box.
#[derive(Debug, Clone)]
pub struct MetaballField {
    metaballs: Vec<Metaball>,
    bounds: Bounds3D,
    margin: f32,
}

impl MetaballField {
    /// Erstellt ein Feld ohne weitere Prüfung. Für zufällig erzeugte Felder
    /// siehe `MetaballFieldBuilder`.
    pub fn new(metaballs: Vec<Metaball>, bounds: Bounds3D, margin: f32) -> Self {
        Self {
            metaballs,
            bounds,
            margin,
        }
    }

    pub fn metaballs(&self) -> &[Metaball] {
        &self.metaballs
    }

    pub fn len(&self) -> usize {
        self.metaballs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metaballs.is_empty()
    }

    pub fn bounds(&self) -> Bounds3D {
        self.bounds
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Bereich, in dem sich die Metaball-Zentren bewegen dürfen.
    pub fn motion_bounds(&self) -> Bounds3D {
        self.bounds.shrink(self.margin)
    }

    pub fn snapshots(&self) -> Vec<MetaballSnapshot> {
        self.metaballs.iter().map(Metaball::snapshot).collect()
    }

    /// Bewegt alle Metaballs um `velocity * dt`.
    ///
    /// Würde ein Ball die Bewegungsgrenzen verlassen, wird seine Geschwindigkeit
    /// auf allen drei Achsen gleichzeitig umgekehrt und die Position mit der
    /// gespiegelten Geschwindigkeit neu berechnet. Die neue Position wird ohne
    /// weitere Prüfung übernommen.
    pub fn advance(&mut self, dt: f32) {
        let motion_bounds = self.motion_bounds();
        for ball in self.metaballs.iter_mut() {
            let mut next_position = ball.position() + ball.velocity * dt;
            if !motion_bounds.contains_point(next_position) {
                ball.velocity = -ball.velocity;
                next_position = ball.position() + ball.velocity * dt;
            }
            ball.set_position(next_position);
        }
    }
}

impl ScalarField3D for MetaballField {
    fn sample(&self, point: Vec3) -> f32 {
        self.metaballs
            .iter()
            .map(|ball| ball.influence_at(point))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::metaballs::metaball::Polarity;
    use crate::math::utils::constants::BOUNDARY_MARGIN;
    use approx::assert_relative_eq;

    fn test_bounds() -> Bounds3D {
        Bounds3D::from_dimensions(10.0, 10.0, 10.0).unwrap()
    }

    fn ball(position: Vec3, radius: f32, velocity: Vec3, polarity: Polarity) -> Metaball {
        Metaball::new(position, radius, velocity, polarity).unwrap()
    }

    #[test]
    fn test_empty_field_samples_zero() {
        let field = MetaballField::new(Vec::new(), test_bounds(), BOUNDARY_MARGIN);
        assert!(field.is_empty());
        assert_eq!(field.sample(Vec3::new(1.0, 2.0, 3.0)), 0.0);
        assert_eq!(field.sample(Vec3::splat(5.0)), 0.0);
    }

    #[test]
    fn test_single_ball_sample() {
        let field = MetaballField::new(
            vec![ball(Vec3::splat(5.0), 2.0, Vec3::ZERO, Polarity::Positive)],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        // d = 3 -> 4 / 9
        assert_relative_eq!(field.sample(Vec3::new(5.0, 8.0, 5.0)), 4.0 / 9.0);
    }

    #[test]
    fn test_sampling_is_order_independent() {
        let a = ball(Vec3::new(3.0, 3.0, 3.0), 1.5, Vec3::ZERO, Polarity::Positive);
        let b = ball(Vec3::new(7.0, 6.0, 5.0), 2.5, Vec3::ZERO, Polarity::Negative);
        let c = ball(Vec3::new(5.0, 7.0, 3.0), 1.0, Vec3::ZERO, Polarity::Positive);

        let forward = MetaballField::new(
            vec![a.clone(), b.clone(), c.clone()],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        let backward = MetaballField::new(
            vec![c.clone(), b.clone(), a.clone()],
            test_bounds(),
            BOUNDARY_MARGIN,
        );

        let point = Vec3::new(4.0, 5.0, 6.0);
        let expected = a.influence_at(point) + b.influence_at(point) + c.influence_at(point);
        assert_relative_eq!(forward.sample(point), expected, epsilon = 1e-5);
        assert_relative_eq!(backward.sample(point), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_advance_inside_bounds() {
        let mut field = MetaballField::new(
            vec![ball(
                Vec3::splat(5.0),
                1.0,
                Vec3::new(0.5, -0.25, 1.0),
                Polarity::Positive,
            )],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        field.advance(2.0);
        let moved = &field.metaballs()[0];
        assert_eq!(moved.position(), Vec3::new(6.0, 4.5, 7.0));
        assert_eq!(moved.velocity, Vec3::new(0.5, -0.25, 1.0));
    }

    #[test]
    fn test_advance_reflects_all_axes() {
        let velocity = Vec3::new(-1.0, 0.5, 0.25);
        let mut field = MetaballField::new(
            vec![ball(
                Vec3::new(2.5, 5.0, 5.0),
                1.0,
                velocity,
                Polarity::Positive,
            )],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        field.advance(1.0);

        let reflected = &field.metaballs()[0];
        // Nur x würde die Grenze verletzen, gespiegelt werden trotzdem alle Achsen
        assert_eq!(reflected.velocity, -velocity);
        assert_eq!(reflected.position(), Vec3::new(3.5, 4.5, 4.75));
        assert!(field.motion_bounds().contains_point(reflected.position()));
        for axis in 0..3 {
            assert_eq!(reflected.velocity[axis].signum(), -velocity[axis].signum());
        }
    }

    #[test]
    fn test_advance_reflects_at_upper_face() {
        let mut field = MetaballField::new(
            vec![ball(
                Vec3::new(5.0, 5.0, 7.8),
                1.0,
                Vec3::new(0.0, 0.0, 0.5),
                Polarity::Negative,
            )],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        field.advance(1.0);
        let reflected = &field.metaballs()[0];
        assert_eq!(reflected.velocity, Vec3::new(0.0, 0.0, -0.5));
        assert_relative_eq!(reflected.position().z, 7.3, epsilon = 1e-5);
        assert!(field.motion_bounds().contains_point(reflected.position()));
    }

    #[test]
    fn test_snapshots() {
        let field = MetaballField::new(
            vec![
                ball(Vec3::splat(4.0), 1.0, Vec3::ZERO, Polarity::Positive),
                ball(Vec3::splat(6.0), 2.0, Vec3::ONE, Polarity::Negative),
            ],
            test_bounds(),
            BOUNDARY_MARGIN,
        );
        let snapshots = field.snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].position, Vec3::splat(6.0));
        assert_eq!(snapshots[1].radius, 2.0);
        assert_eq!(snapshots[1].polarity, Polarity::Negative);
    }
}
