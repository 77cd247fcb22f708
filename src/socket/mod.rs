//! Socket Client
//!
//! A single WebSocket connection to a fixed endpoint. On open it logs
//! `Connected.` and sends one greeting; every inbound message is logged
//! verbatim. Close and error conditions are silently absorbed.

mod client;
mod handler;
mod plugin;

pub use client::{ReadyState, SocketClient, SocketEvent, SocketSender};
pub use handler::{
    CONNECTED_LINE, Console, GreetingHandler, LogConsole, SocketHandler, SocketHandlerRegistry,
};
pub use plugin::{SocketConnection, SocketPlugin};
