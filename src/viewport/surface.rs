use bevy::prelude::*;

use crate::config::ViewportConfig;

/// The drawable surface whose bitmap size tracks the viewport.
///
/// Attached once to the window named after the surface id. Resizes mutate the
/// existing component in place.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct DisplaySurface {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl DisplaySurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: 0,
            height: 0,
        }
    }

    /// Set the bitmap size from a pixel ratio and logical viewport size.
    ///
    /// Returns `true` if the dimensions changed.
    pub fn resize(&mut self, ratio: f64, width: f64, height: f64) -> bool {
        let (width, height) = surface_size(ratio, width, height);
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Resize from a window's current scale factor and logical size.
    pub fn resize_to_window(&mut self, window: &Window) -> bool {
        self.resize(
            window.scale_factor() as f64,
            window.width() as f64,
            window.height() as f64,
        )
    }
}

/// Bitmap size for a viewport: `(⌊ratio·width⌋, ⌊ratio·height⌋)`.
pub fn surface_size(ratio: f64, width: f64, height: f64) -> (u32, u32) {
    (scale_dimension(ratio, width), scale_dimension(ratio, height))
}

fn scale_dimension(ratio: f64, logical: f64) -> u32 {
    // `as` saturates: NaN and negatives become 0, overflow becomes u32::MAX.
    (ratio * logical).floor() as u32
}

/// A primary window preset bound to the display surface.
///
/// On wasm the `canvas` selector binds the window to the page's
/// `<canvas id="display">` element.
pub fn display_window(config: &ViewportConfig) -> Window {
    Window {
        title: "bevy_viewport_socket".to_string(),
        name: Some(config.surface_id.clone()),
        canvas: Some(format!("#{}", config.surface_id)),
        fit_canvas_to_parent: true,
        ..default()
    }
}
