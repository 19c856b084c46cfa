pub mod algorithms;
pub mod error;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use scalar_field::ScalarField3D;
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            IsoMesh, IsoTriangle, Metaball, MetaballField, MetaballFieldBuilder, MetaballSnapshot,
            Polarity, VoxelGrid,
        },
        error::{MathError, MathResult},
        scalar_field::ScalarField3D,
        types::*,
    };
}
