//! Demo Server
//!
//! The counterpart the socket client talks to: accepts WebSocket upgrades on
//! one path and echoes every data frame back to its sender.

use futures_util::{SinkExt, StreamExt};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::config::ServerConfig;

pub struct DemoServer {
    listener: TcpListener,
    path: Arc<str>,
}

impl DemoServer {
    /// Bind the listener. Use port 0 in the config to get an ephemeral port.
    pub async fn bind(config: ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        Ok(Self {
            listener,
            path: config.path.into(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients until the task is dropped. Each client is served on
    /// its own task; a failing client never stops the accept loop.
    pub async fn run(self) {
        match self.local_addr() {
            Ok(addr) => log::info!("Demo server listening on ws://{}{}", addr, self.path),
            Err(e) => log::warn!("Demo server listening on unknown address: {}", e),
        }

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::error!("Accept failed: {}", e);
                    continue;
                }
            };

            let path = self.path.clone();
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, peer, path).await {
                    log::warn!("[{}] Connection error: {}", peer, e);
                }
            });
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    path: Arc<str>,
) -> Result<(), tungstenite::Error> {
    let check_path = move |request: &Request, response: Response| {
        if request.uri().path() == &*path {
            return Ok(response);
        }
        let mut rejection = ErrorResponse::new(Some(format!(
            "no websocket endpoint at {}",
            request.uri().path()
        )));
        *rejection.status_mut() = StatusCode::NOT_FOUND;
        Err(rejection)
    };

    let ws_stream = tokio_tungstenite::accept_hdr_async(stream, check_path).await?;
    log::info!("[{}] Connected", peer);

    let (mut write, mut read) = ws_stream.split();
    while let Some(frame) = read.next().await {
        match frame? {
            Message::Text(text) => {
                log::info!("[{}] Received: {}", peer, text.as_str());
                write.send(Message::Text(text)).await?;
            }
            Message::Binary(data) => {
                log::info!("[{}] Received binary ({} bytes)", peer, data.len());
                write.send(Message::Binary(data)).await?;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    log::info!("[{}] Disconnected", peer);
    Ok(())
}
