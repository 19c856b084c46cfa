//! Bevy-`Plugin`, das die Isoflächen-Engine als Ressource bereitstellt
//! und pro Frame einen Simulationsschritt ausführt.

use super::config::EngineConfig;
use super::engine::IsosurfaceEngine;
use super::state::SimulationState;
use super::systems::*;
use bevy::prelude::*;

/// Registriert `EngineConfig`, `IsosurfaceEngine` und `SimulationState`.
///
/// Ablauf pro Frame (`Update`):
/// - Konfigurationsänderungen übernehmen (Neuaufbau oder nur Isowert),
/// - im Zustand `Running` einen Tick ausführen,
/// - Mesh-Statistiken loggen.
///
/// Pausieren/Fortsetzen erfolgt über `NextState<SimulationState>`.
pub struct MetaballSimPlugin;

impl Plugin for MetaballSimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>();

        let config = app.world.resource::<EngineConfig>().clone();
        let engine = match IsosurfaceEngine::new(config) {
            Ok(engine) => engine,
            Err(err) => {
                error!("Invalid EngineConfig ({}), falling back to defaults.", err);
                let fallback = EngineConfig::default();
                app.insert_resource(fallback.clone());
                match IsosurfaceEngine::new(fallback) {
                    Ok(engine) => engine,
                    Err(err) => {
                        error!("Default EngineConfig rejected: {}", err);
                        return;
                    }
                }
            }
        };

        app.insert_resource(engine)
            .init_state::<SimulationState>()
            .add_systems(
                Update,
                finish_initialization_system.run_if(in_state(SimulationState::Initializing)),
            )
            .add_systems(OnEnter(SimulationState::Running), resume_engine_system)
            .add_systems(OnEnter(SimulationState::Paused), pause_engine_system)
            .add_systems(
                Update,
                (
                    apply_config_changes_system,
                    tick_engine_system.run_if(in_state(SimulationState::Running)),
                    log_mesh_stats_system,
                )
                    .chain(),
            );
    }
}
