//! Viewport Plugin for Bevy
//!
//! Keeps a [`DisplaySurface`] on the surface window sized to
//! `scale_factor × logical size`, once at startup and again on every resize.

use bevy::prelude::*;
use bevy::window::{WindowResized, WindowScaleFactorChanged};

use crate::config::ViewportConfig;
use crate::error::ViewportError;
use crate::viewport::DisplaySurface;

/// Identifier of the window that carries the display surface.
#[derive(Resource, Clone, Debug)]
pub struct SurfaceId(pub String);

#[derive(Default)]
pub struct ViewportPlugin {
    config: ViewportConfig,
}

impl ViewportPlugin {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SurfaceId(self.config.surface_id.clone()))
            .add_systems(Startup, attach_display_surface)
            .add_systems(Update, resize_display_surface);

        log::info!("Viewport plugin configured for surface {:?}", self.config.surface_id);
    }
}

/// Find the surface window, attach the [`DisplaySurface`] and size it once.
pub fn attach_display_surface(
    mut commands: Commands,
    surface_id: Res<SurfaceId>,
    windows: Query<(Entity, &Window), Without<DisplaySurface>>,
) -> Result {
    let Some((entity, window)) = windows
        .iter()
        .find(|(_, window)| window.name.as_deref() == Some(surface_id.0.as_str()))
    else {
        return Err(ViewportError::MissingSurface(surface_id.0.clone()).into());
    };

    let mut surface = DisplaySurface::new(surface_id.0.clone());
    surface.resize_to_window(window);
    log::info!(
        "Display surface {:?} attached at {}x{}",
        surface.id,
        surface.width,
        surface.height
    );
    commands.entity(entity).insert(surface);
    Ok(())
}

/// Resize the surface once per resize or scale-factor notification.
pub fn resize_display_surface(
    mut resized: MessageReader<WindowResized>,
    mut rescaled: MessageReader<WindowScaleFactorChanged>,
    mut surfaces: Query<(&Window, &mut DisplaySurface)>,
) {
    let notified: Vec<Entity> = resized
        .read()
        .map(|message| message.window)
        .chain(rescaled.read().map(|message| message.window))
        .collect();

    for entity in notified {
        let Ok((window, mut surface)) = surfaces.get_mut(entity) else {
            continue;
        };

        if surface.bypass_change_detection().resize_to_window(window) {
            surface.set_changed();
            log::debug!(
                "Display surface {:?} resized to {}x{}",
                surface.id,
                surface.width,
                surface.height
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::surface_size;

    fn app_with_window(name: &str, scale: f32, width: f32, height: f32) -> (App, Entity) {
        let mut app = App::new();
        app.add_message::<WindowResized>()
            .add_message::<WindowScaleFactorChanged>()
            .add_plugins(ViewportPlugin::default());

        let mut window = Window {
            name: Some(name.to_string()),
            ..default()
        };
        window.resolution.set_scale_factor_override(Some(scale));
        window.resolution.set(width, height);
        let entity = app.world_mut().spawn(window).id();
        (app, entity)
    }

    fn expected_size(app: &App, entity: Entity) -> (u32, u32) {
        let window = app.world().get::<Window>(entity).unwrap();
        surface_size(
            window.scale_factor() as f64,
            window.width() as f64,
            window.height() as f64,
        )
    }

    fn surface(app: &App, entity: Entity) -> DisplaySurface {
        app.world().get::<DisplaySurface>(entity).unwrap().clone()
    }

    #[test]
    fn surface_is_sized_at_startup() {
        let (mut app, entity) = app_with_window("display", 2.0, 400.0, 300.0);
        app.update();

        let surface = surface(&app, entity);
        assert_eq!(surface.id, "display");
        assert_eq!((surface.width, surface.height), (800, 600));
    }

    #[test]
    #[should_panic]
    fn missing_surface_fails_startup() {
        let (mut app, _) = app_with_window("not-the-display", 1.0, 400.0, 300.0);
        app.update();
    }

    #[test]
    fn resize_notification_updates_existing_surface() {
        let (mut app, entity) = app_with_window("display", 2.0, 400.0, 300.0);
        app.update();

        app.world_mut()
            .get_mut::<Window>(entity)
            .unwrap()
            .resolution
            .set(1024.0, 768.0);
        app.world_mut().write_message(WindowResized {
            window: entity,
            width: 1024.0,
            height: 768.0,
        });
        app.update();

        let surface = surface(&app, entity);
        assert_eq!((surface.width, surface.height), (2048, 1536));

        let count = app
            .world_mut()
            .query::<&DisplaySurface>()
            .iter(app.world())
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn scale_factor_change_updates_surface() {
        let (mut app, entity) = app_with_window("display", 2.0, 400.0, 300.0);
        app.update();

        app.world_mut()
            .get_mut::<Window>(entity)
            .unwrap()
            .resolution
            .set_scale_factor_override(Some(1.0));
        app.world_mut().write_message(WindowScaleFactorChanged {
            window: entity,
            scale_factor: 1.0,
        });
        app.update();

        assert_eq!(
            (surface(&app, entity).width, surface(&app, entity).height),
            expected_size(&app, entity)
        );
    }

    #[test]
    fn resize_without_notification_leaves_surface_alone() {
        let (mut app, entity) = app_with_window("display", 1.0, 400.0, 300.0);
        app.update();

        app.world_mut()
            .get_mut::<Window>(entity)
            .unwrap()
            .resolution
            .set(900.0, 900.0);
        app.update();

        let surface = surface(&app, entity);
        assert_eq!((surface.width, surface.height), (400, 300));
    }
}
