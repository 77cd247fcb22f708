//! Builder-style configuration for the viewport, socket and demo server.
//!
//! Nothing here is read from disk or the environment; the defaults are the
//! fixed demo values and the `with_*` builders exist for tests and embedding.

use std::net::{Ipv4Addr, SocketAddr};

/// Identifier of the display surface window / canvas element.
pub const DEFAULT_SURFACE_ID: &str = "display";

/// Endpoint the socket client connects to at startup.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/demo";

/// Text sent exactly once, right after the connection opens.
pub const DEFAULT_GREETING: &str = "Hello, World!";

/// Port the demo server listens on.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Request path the demo server upgrades to a WebSocket.
pub const DEFAULT_SERVER_PATH: &str = "/demo";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportConfig {
    pub surface_id: String,
}

impl ViewportConfig {
    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = surface_id.into();
        self
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            surface_id: DEFAULT_SURFACE_ID.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketConfig {
    pub endpoint: String,
    pub greeting: String,
}

impl SocketConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub path: String,
}

impl ServerConfig {
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_SERVER_PORT)),
            path: DEFAULT_SERVER_PATH.to_string(),
        }
    }
}
