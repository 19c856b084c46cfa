pub mod config;
pub mod engine;
pub mod plugin;
pub mod state;
pub mod systems;

pub use config::EngineConfig;
pub use engine::IsosurfaceEngine;
pub use plugin::MetaballSimPlugin;
pub use state::SimulationState;
