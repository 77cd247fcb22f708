use bevy::prelude::*;
use bevy_viewport_socket::{ViewportConfig, ViewportSocketPlugins, display_window};

fn main() {
    let viewport = ViewportConfig::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(display_window(&viewport)),
            ..default()
        }))
        .add_plugins(ViewportSocketPlugins {
            viewport,
            ..default()
        })
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
