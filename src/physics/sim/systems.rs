use super::config::EngineConfig;
use super::engine::IsosurfaceEngine;
use super::state::SimulationState;
use bevy::prelude::*;

/// Wechselt nach der Initialisierung je nach Konfiguration in Running oder Paused.
pub fn finish_initialization_system(
    config: Res<EngineConfig>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if config.start_paused {
        next_state.set(SimulationState::Paused);
        info!("Initialization complete, simulation is Paused.");
    } else {
        next_state.set(SimulationState::Running);
        info!("Initialization complete, simulation is Running.");
    }
}

pub fn resume_engine_system(mut engine: ResMut<IsosurfaceEngine>) {
    engine.resume();
}

pub fn pause_engine_system(mut engine: ResMut<IsosurfaceEngine>) {
    engine.pause();
}

/// Übernimmt Änderungen an `EngineConfig`. Reine Isowert-Änderungen werden
/// ohne Neuaufbau übernommen, alles andere baut Feld und Gitter neu auf.
/// Eine ungültige Konfiguration wird verworfen, die Engine läuft mit der alten weiter.
pub fn apply_config_changes_system(
    config: Res<EngineConfig>,
    mut engine: ResMut<IsosurfaceEngine>,
    current_state: Res<State<SimulationState>>,
) {
    if !config.is_changed() || config.is_added() || engine.config() == config.as_ref() {
        return;
    }

    if engine.config().differs_only_in_isolevel(&config) {
        if let Err(err) = engine.set_isolevel(config.isolevel) {
            warn!("Keeping previous isolevel {:.3}: {}", engine.isolevel(), err);
            return;
        }
        debug!("Isolevel changed to {:.3}", config.isolevel);
        return;
    }

    if let Err(err) = engine.configure(config.clone()) {
        warn!("Keeping previous configuration: {}", err);
        return;
    }

    // Der Pausenzustand folgt weiterhin dem State, nicht `start_paused`
    match current_state.get() {
        SimulationState::Running => engine.resume(),
        SimulationState::Paused => engine.pause(),
        SimulationState::Initializing => {}
    }
}

pub fn tick_engine_system(mut engine: ResMut<IsosurfaceEngine>) {
    engine.tick();
}

/// Alle wie viele Ticks die Mesh-Statistik geloggt wird.
/// `active_voxel_count` läuft über das ganze Gitter und ist entsprechend teuer.
pub const MESH_STATS_LOG_INTERVAL: u64 = 60;

/// Wird im Tick `tick_count` eine Statistik geloggt?
pub fn is_stats_tick(tick_count: u64) -> bool {
    tick_count > 0 && tick_count % MESH_STATS_LOG_INTERVAL == 0
}

pub fn log_mesh_stats_system(engine: Res<IsosurfaceEngine>) {
    if !engine.is_changed() || !is_stats_tick(engine.tick_count()) {
        return;
    }
    let mesh = engine.mesh();
    debug!(
        "Tick {}: {} triangles, {} active voxels, {} metaballs",
        engine.tick_count(),
        mesh.triangle_count(),
        engine.grid().active_voxel_count(engine.isolevel()),
        engine.field().len()
    );
}
