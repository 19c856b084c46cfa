// ./src/main.rs
use bevy::log::LogPlugin;
use bevy::prelude::*;

use metaball_sim::physics::sim::{EngineConfig, MetaballSimPlugin};

fn main() {
    App::new()
        // Headless: kein Fenster, kein Rendering. Das Mesh liegt in der
        // `IsosurfaceEngine`-Ressource für externe Konsumenten bereit.
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .insert_resource(EngineConfig::default())
        .add_plugins(MetaballSimPlugin)
        .run();
}
