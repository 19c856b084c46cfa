// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// 3D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point3D, max: Point3D) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z || !min.is_finite() || !max.is_finite()
        {
            return Err(MathError::InvalidBounds {
                min: min.to_array(),
                max: max.to_array(),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Box mit Ursprung im Nullpunkt und den gegebenen Ausdehnungen.
    /// Alle Ausdehnungen müssen positiv sein.
    pub fn from_dimensions(width: f32, height: f32, depth: f32) -> MathResult<Self> {
        let size = Vec3::new(width, height, depth);
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Bounding box dimensions must be positive, got {}x{}x{}",
                    width, height, depth
                ),
            });
        }
        Self::new(Vec3::ZERO, size)
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let (min, max) = points_iter.fold((first_point, first_point), |(min, max), point| {
            (min.min(point), max.max(point))
        });

        Some(Self { min, max })
    }

    /// Prüft ob die Bounding Box leer ist
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Größe der Bounding Box
    pub fn size(&self) -> Vec3 {
        (self.max - self.min).max(Vec3::ZERO)
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    pub fn volume(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            let size = self.size();
            size.x * size.y * size.z
        }
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt (Ränder inklusive)
    pub fn contains_point(&self, point: Point3D) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Verkleinert die Box auf jeder Seite um `margin`.
    /// Das Ergebnis kann leer sein, wenn `margin` größer als die halbe Ausdehnung ist.
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec3::splat(margin),
            max: self.max - Vec3::splat(margin),
        }
    }
}

impl fmt::Display for Bounds3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds3D[({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}
