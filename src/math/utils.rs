// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const SQRT_3: f32 = 1.7320508075688772;

    /// Schrittweite der zentralen Differenzen für Vertex-Normalen (Welteinheiten).
    pub const NORMAL_EPSILON: f32 = 0.1;

    /// Untergrenze für das Abstandsquadrat beim Sampling eines Metaballs.
    /// Verhindert `+inf`, wenn ein Sample-Punkt exakt auf dem Zentrum liegt.
    pub const MIN_DISTANCE_SQ: f32 = 1e-6;

    /// Abstand der Reflexionsgrenzen zur Bounding Box (Welteinheiten).
    pub const BOUNDARY_MARGIN: f32 = 2.0;

    /// Wahrscheinlichkeit für einen additiven (positiven) Metaball.
    pub const POSITIVE_POLARITY_PROBABILITY: f64 = 0.75;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Inverse lineare Interpolation, geklemmt auf [0, 1].
    /// Bei (nahezu) gleichen Endwerten wird die Mitte (0.5) geliefert.
    pub fn inverse_lerp_clamped(a: f32, b: f32, value: f32) -> f32 {
        if nearly_equal(a, b) {
            0.5
        } else {
            ((value - a) / (b - a)).clamp(0.0, 1.0)
        }
    }
}
