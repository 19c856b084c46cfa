// src/math/scalar_field.rs

use crate::math::utils::constants::NORMAL_EPSILON;
use bevy::math::Vec3;

/// Trait für ein dreidimensionales Skalarfeld.
/// Ermöglicht es Algorithmen wie Marching Cubes, auf verschiedenen
/// Feldimplementierungen zu operieren (z.B. `MetaballField` oder ein Mock im Test).
pub trait ScalarField3D {
    /// Gibt den Skalarwert (Isowert) an einem beliebigen Punkt in Weltkoordinaten zurück.
    fn sample(&self, point: Vec3) -> f32;

    /// Gradient per zentraler Differenz mit Schrittweite `step` entlang jeder Achse.
    /// Kostet sechs zusätzliche Samples.
    fn gradient(&self, point: Vec3, step: f32) -> Vec3 {
        let dx = Vec3::X * step;
        let dy = Vec3::Y * step;
        let dz = Vec3::Z * step;
        Vec3::new(
            self.sample(point + dx) - self.sample(point - dx),
            self.sample(point + dy) - self.sample(point - dy),
            self.sample(point + dz) - self.sample(point - dz),
        )
    }

    /// Normierter Gradient mit der festen Schrittweite `NORMAL_EPSILON`.
    /// Verschwindet der Gradient, wird der Nullvektor geliefert.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.gradient(point, NORMAL_EPSILON).normalize_or_zero()
    }
}

// Beliebige Closures als Feld, praktisch für Tests und analytische Felder.
impl<F> ScalarField3D for F
where
    F: Fn(Vec3) -> f32,
{
    fn sample(&self, point: Vec3) -> f32 {
        self(point)
    }
}
