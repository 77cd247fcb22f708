//! Socket event handlers
//!
//! Handlers are registered once with [`SocketPlugin`](crate::socket::SocketPlugin)
//! and invoked on the main schedule, one event at a time.

use std::sync::Arc;

use crate::socket::{SocketEvent, SocketSender};

/// Line written to the console when the connection opens.
pub const CONNECTED_LINE: &str = "Connected.";

/// Diagnostic output for socket handlers. One call per log entry.
pub trait Console: Send + Sync {
    fn log(&self, line: &str);
}

/// Writes every line through the `log` facade at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogConsole;

impl Console for LogConsole {
    fn log(&self, line: &str) {
        log::info!("{}", line);
    }
}

/// Callbacks for the two notifications a connection produces.
///
/// There is no close or error callback; those conditions are absorbed by
/// the transport.
pub trait SocketHandler: Send + Sync {
    /// Called once, after the handshake completes.
    fn on_open(&self, _socket: &SocketSender) {}

    /// Called once per inbound message.
    fn on_message(&self, _socket: &SocketSender, _payload: &str) {}
}

/// Ordered set of handlers that every event is fanned out to.
#[derive(Default)]
pub struct SocketHandlerRegistry {
    handlers: Vec<Arc<dyn SocketHandler>>,
}

impl SocketHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn SocketHandler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler for `event`, in registration order.
    pub fn dispatch(&self, event: &SocketEvent, socket: &SocketSender) {
        for handler in &self.handlers {
            match event {
                SocketEvent::Open => handler.on_open(socket),
                SocketEvent::Message(payload) => handler.on_message(socket, payload),
            }
        }
    }
}

/// Logs `Connected.` and sends the greeting on open; logs every message verbatim.
pub struct GreetingHandler {
    greeting: String,
    console: Arc<dyn Console>,
}

impl GreetingHandler {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            console: Arc::new(LogConsole),
        }
    }

    pub fn with_console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = console;
        self
    }
}

impl SocketHandler for GreetingHandler {
    fn on_open(&self, socket: &SocketSender) {
        self.console.log(CONNECTED_LINE);
        if let Err(e) = socket.send(self.greeting.as_str()) {
            log::warn!("[Socket] Failed to send greeting: {}", e);
        }
    }

    fn on_message(&self, _socket: &SocketSender, payload: &str) {
        self.console.log(payload);
    }
}
