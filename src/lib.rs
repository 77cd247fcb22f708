//! # Viewport + Socket Demo for Bevy
//!
//! Two independent pieces wired into one Bevy app:
//!
//! - a display surface whose bitmap size follows `scale factor × window size`,
//!   set at startup and on every resize notification;
//! - one WebSocket connection to `ws://localhost:8000/demo` that logs
//!   `Connected.`, sends `Hello, World!` once, and logs every inbound message.
//!
//! ## Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_viewport_socket::{ViewportConfig, ViewportSocketPlugins, display_window};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins.set(WindowPlugin {
//!             primary_window: Some(display_window(&ViewportConfig::default())),
//!             ..default()
//!         }))
//!         .add_plugins(ViewportSocketPlugins::default())
//!         .run();
//! }
//! ```
//!
//! The `demo_server` binary provides the endpoint the client connects to.

pub mod config;
pub mod error;
pub mod server;
pub mod socket;
pub mod viewport;

mod plugins;

pub use config::*;
pub use error::{SocketError, ViewportError};
pub use plugins::ViewportSocketPlugins;
pub use server::DemoServer;
pub use socket::*;
pub use viewport::*;
