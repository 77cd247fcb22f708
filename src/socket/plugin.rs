//! Socket Plugin for Bevy
//!
//! Opens the single connection while the app is built and dispatches its
//! notifications to the registered handlers from the `Update` schedule.

use bevy::prelude::*;
use std::ops::Deref;
use std::sync::{Arc, Mutex};

use crate::config::SocketConfig;
use crate::socket::{GreetingHandler, SocketClient, SocketHandler, SocketHandlerRegistry};

/// Bevy Resource wrapper for the connection. Lives for the whole app.
#[derive(Resource)]
pub struct SocketConnection(SocketClient);

impl Deref for SocketConnection {
    type Target = SocketClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Resource)]
struct SocketHandlers(SocketHandlerRegistry);

/// Bevy plugin for the socket client.
///
/// ## Usage
///
/// ```ignore
/// App::new()
///     .add_plugins(SocketPlugin::new(SocketConfig::default()))
///     .run();
/// ```
pub struct SocketPlugin {
    config: SocketConfig,
    /// Taken out in `build`; `Plugin::build` only gets `&self`.
    handlers: Mutex<Option<SocketHandlerRegistry>>,
}

impl SocketPlugin {
    /// A plugin with the [`GreetingHandler`] for `config.greeting` registered.
    pub fn new(config: SocketConfig) -> Self {
        let mut handlers = SocketHandlerRegistry::new();
        handlers.register(Arc::new(GreetingHandler::new(config.greeting.clone())));
        Self {
            config,
            handlers: Mutex::new(Some(handlers)),
        }
    }

    /// A plugin with no handlers registered.
    pub fn without_handlers(config: SocketConfig) -> Self {
        Self {
            config,
            handlers: Mutex::new(Some(SocketHandlerRegistry::new())),
        }
    }

    /// Register an additional handler.
    pub fn with_handler(self, handler: Arc<dyn SocketHandler>) -> Self {
        if let Ok(mut guard) = self.handlers.lock() {
            if let Some(ref mut handlers) = *guard {
                handlers.register(handler);
            }
        }
        self
    }

    fn take_handlers(&self) -> SocketHandlerRegistry {
        self.handlers
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .unwrap_or_default()
    }
}

impl Default for SocketPlugin {
    fn default() -> Self {
        Self::new(SocketConfig::default())
    }
}

impl Plugin for SocketPlugin {
    fn build(&self, app: &mut App) {
        let handlers = self.take_handlers();

        match SocketClient::connect(&self.config.endpoint) {
            Ok(client) => {
                app.insert_resource(SocketConnection(client));
            }
            Err(e) => {
                log::error!(
                    "Failed to start socket client for {}: {}",
                    self.config.endpoint,
                    e
                );
            }
        }

        app.insert_resource(SocketHandlers(handlers))
            .add_systems(Update, dispatch_socket_events);

        log::info!("Socket plugin configured for {}", self.config.endpoint);
    }
}

/// Drain every pending socket event and hand it to the handlers, in order.
fn dispatch_socket_events(
    connection: Option<Res<SocketConnection>>,
    handlers: Res<SocketHandlers>,
) {
    let Some(connection) = connection else {
        return;
    };

    let socket = connection.sender();
    while let Some(event) = connection.try_recv() {
        handlers.0.dispatch(&event, &socket);
    }
}
