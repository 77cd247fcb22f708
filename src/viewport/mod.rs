//! Viewport Sizer
//!
//! Keeps the display surface's bitmap size equal to the device pixel ratio
//! times the logical viewport size.

mod plugin;
mod surface;

pub use plugin::{SurfaceId, ViewportPlugin, attach_display_surface, resize_display_surface};
pub use surface::{DisplaySurface, display_window, surface_size};
