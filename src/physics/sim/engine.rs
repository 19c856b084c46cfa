use super::config::EngineConfig;
use crate::math::algorithms::marching_cubes::{IsoMesh, VoxelGrid};
use crate::math::algorithms::metaballs::{MetaballField, MetaballFieldBuilder, MetaballSnapshot};
use crate::math::error::{MathError, MathResult};
use crate::math::utils::constants;
use bevy::prelude::*;

/// Verbindet Skalarfeld und Voxelgitter: pro Tick werden die Metaballs bewegt,
/// das Gitter neu gesampelt und das Mesh komplett ersetzt.
#[derive(Resource, Debug)]
pub struct IsosurfaceEngine {
    config: EngineConfig,
    field: MetaballField,
    grid: VoxelGrid,
    mesh: IsoMesh,
    paused: bool,
    tick_count: u64,
}

impl IsosurfaceEngine {
    /// Baut eine Engine aus `config` auf. Ungültige Konfigurationen werden abgelehnt.
    pub fn new(config: EngineConfig) -> MathResult<Self> {
        let (field, grid) = Self::build(&config)?;
        info!(
            "Isosurface engine ready: {}³ voxels, {} metaballs, isolevel {:.2}",
            config.resolution,
            field.len(),
            config.isolevel
        );
        Ok(Self {
            paused: config.start_paused,
            config,
            field,
            grid,
            mesh: IsoMesh::new(),
            tick_count: 0,
        })
    }

    fn build(config: &EngineConfig) -> MathResult<(MetaballField, VoxelGrid)> {
        config.validate()?;
        let bounds = config.bounds()?;
        let field = MetaballFieldBuilder::new()
            .bounds(bounds)
            .margin(constants::BOUNDARY_MARGIN)
            .count(config.metaball_count)
            .radius_range(config.min_radius, config.max_radius)
            .max_speed(config.max_speed)
            .placement(config.placement)
            .seed(config.seed)
            .build()?;
        let grid = VoxelGrid::new(config.resolution, bounds)?;
        Ok((field, grid))
    }

    /// Baut Feld und Gitter komplett neu auf. Bei einem Fehler bleibt
    /// die bisherige Konfiguration samt Zustand unverändert.
    pub fn configure(&mut self, config: EngineConfig) -> MathResult<()> {
        let (field, grid) = match Self::build(&config) {
            Ok(parts) => parts,
            Err(err) => {
                warn!("Rejected engine configuration: {}", err);
                return Err(err);
            }
        };
        info!(
            "Rebuilding isosurface engine: {}³ voxels, {} metaballs",
            config.resolution,
            field.len()
        );
        self.paused = config.start_paused;
        self.config = config;
        self.field = field;
        self.grid = grid;
        self.mesh.clear();
        self.tick_count = 0;
        Ok(())
    }

    /// Ein Simulationsschritt. Im pausierten Zustand passiert nichts,
    /// das letzte Mesh bleibt erhalten.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.field.advance(self.config.time_step);
        self.mesh = self.grid.tick(&self.field, self.config.isolevel);
        self.tick_count += 1;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn mesh(&self) -> &IsoMesh {
        &self.mesh
    }

    pub fn metaballs(&self) -> Vec<MetaballSnapshot> {
        self.field.snapshots()
    }

    pub fn field(&self) -> &MetaballField {
        &self.field
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn isolevel(&self) -> f32 {
        self.config.isolevel
    }

    /// Neuer Isowert, wirksam ab dem nächsten Tick.
    /// Nicht-endliche Werte werden abgelehnt, der bisherige Isowert bleibt.
    pub fn set_isolevel(&mut self, isolevel: f32) -> MathResult<()> {
        if !isolevel.is_finite() {
            let err = MathError::InvalidConfiguration {
                message: format!("isolevel must be finite, got {}", isolevel),
            };
            warn!("Rejected isolevel: {}", err);
            return Err(err);
        }
        self.config.isolevel = isolevel;
        Ok(())
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::metaballs::{Metaball, Polarity};
    use crate::math::scalar_field::ScalarField3D;
    use bevy::math::Vec3;

    fn small_config() -> EngineConfig {
        EngineConfig {
            resolution: 8,
            width: 16.0,
            height: 16.0,
            depth: 16.0,
            isolevel: 1.0,
            metaball_count: 3,
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = EngineConfig {
            resolution: 0,
            ..Default::default()
        };
        assert!(matches!(
            IsosurfaceEngine::new(config),
            Err(MathError::InvalidResolution { resolution: 0 })
        ));
    }

    #[test]
    fn test_tick_produces_well_formed_mesh() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        assert!(engine.mesh().is_empty());
        for _ in 0..3 {
            engine.tick();
            let mesh = engine.mesh();
            assert_eq!(mesh.vertices().len(), mesh.normals().len());
            assert_eq!(mesh.vertex_count() % 3, 0);
        }
        assert_eq!(engine.tick_count(), 3);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        engine.tick();
        engine.pause();

        let mesh_before = engine.mesh().clone();
        let balls_before = engine.metaballs();
        let values_before: Vec<f32> = engine
            .grid()
            .voxels()
            .iter()
            .flat_map(|voxel| voxel.corners().iter().map(|corner| corner.value()))
            .collect();

        for _ in 0..5 {
            engine.tick();
        }

        assert_eq!(engine.mesh(), &mesh_before);
        assert_eq!(engine.metaballs(), balls_before);
        let values_after: Vec<f32> = engine
            .grid()
            .voxels()
            .iter()
            .flat_map(|voxel| voxel.corners().iter().map(|corner| corner.value()))
            .collect();
        assert_eq!(values_after, values_before);
        assert_eq!(engine.tick_count(), 1);

        engine.resume();
        engine.tick();
        assert_eq!(engine.tick_count(), 2);
        assert_ne!(engine.metaballs(), balls_before);
    }

    #[test]
    fn test_start_paused_and_toggle() {
        let config = EngineConfig {
            start_paused: true,
            ..small_config()
        };
        let mut engine = IsosurfaceEngine::new(config).unwrap();
        assert!(engine.is_paused());
        engine.tick();
        assert!(engine.mesh().is_empty());
        assert_eq!(engine.tick_count(), 0);

        engine.toggle_pause();
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_rejected_configure_keeps_previous_state() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        engine.tick();
        let mesh_before = engine.mesh().clone();

        let invalid = EngineConfig {
            min_radius: 5.0,
            max_radius: 1.0,
            ..small_config()
        };
        assert!(engine.configure(invalid).is_err());
        assert_eq!(engine.config(), &small_config());
        assert_eq!(engine.mesh(), &mesh_before);
        assert_eq!(engine.grid().resolution(), 8);
    }

    #[test]
    fn test_configure_rebuilds() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        engine.tick();

        let bigger = EngineConfig {
            resolution: 10,
            metaball_count: 6,
            ..small_config()
        };
        engine.configure(bigger).unwrap();
        assert_eq!(engine.grid().len(), 1000);
        assert_eq!(engine.metaballs().len(), 6);
        assert!(engine.mesh().is_empty());
        assert_eq!(engine.tick_count(), 0);
    }

    #[test]
    fn test_isolevel_applies_on_next_tick() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        engine.tick();
        let triangles = engine.mesh().triangle_count();

        // Isowert über jedem Feldwert: nächste Extraktion ist leer
        engine.set_isolevel(1.0e9).unwrap();
        assert_eq!(engine.isolevel(), 1.0e9);
        assert_eq!(engine.mesh().triangle_count(), triangles);
        engine.tick();
        assert!(engine.mesh().is_empty());
    }

    #[test]
    fn test_non_finite_isolevel_is_rejected() {
        let mut engine = IsosurfaceEngine::new(small_config()).unwrap();
        engine.tick();
        let triangles = engine.mesh().triangle_count();

        for isolevel in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(matches!(
                engine.set_isolevel(isolevel),
                Err(MathError::InvalidConfiguration { .. })
            ));
            assert_eq!(engine.isolevel(), 1.0);
        }
        assert_eq!(engine.config(), &small_config());
        assert_eq!(engine.mesh().triangle_count(), triangles);
    }

    #[test]
    fn test_zero_metaballs_yield_empty_mesh() {
        let config = EngineConfig {
            metaball_count: 0,
            ..small_config()
        };
        let mut engine = IsosurfaceEngine::new(config).unwrap();
        engine.tick();
        assert!(engine.field().is_empty());
        assert_eq!(engine.field().sample(Vec3::splat(3.0)), 0.0);
        assert_eq!(engine.grid().active_voxel_count(engine.isolevel()), 0);
        assert!(engine.mesh().is_empty());
    }

    #[test]
    fn test_single_metaball_sphere() {
        let bounds = crate::math::types::Bounds3D::from_dimensions(10.0, 10.0, 10.0).unwrap();
        let center = bounds.center();
        let radius = 2.0;
        let isolevel = 1.3;
        let ball = Metaball::new(center, radius, Vec3::ZERO, Polarity::Positive).unwrap();
        let field = MetaballFieldBuilder::new()
            .bounds(bounds)
            .add_metaball(ball.clone())
            .build()
            .unwrap();
        let mut grid = VoxelGrid::new(10, bounds).unwrap();

        let mesh = grid.tick(&field, isolevel);
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.vertices().len(), mesh.normals().len());

        let r_iso = ball.iso_radius(isolevel).unwrap();
        let diagonal = grid.cell_size().length();
        for vertex in mesh.vertices() {
            assert!(vertex.is_finite());
            let distance = vertex.distance(center);
            assert!(
                (distance - r_iso).abs() <= diagonal,
                "vertex {vertex:?} at distance {distance}, expected ~{r_iso}"
            );
        }
        for normal in mesh.normals() {
            assert!(normal.is_finite());
        }
    }
}
