//! Socket transport
//!
//! One outbound WebSocket connection driven by tokio-tungstenite on a
//! background runtime. Notifications are pushed onto a channel that the
//! Bevy main thread drains, so handlers always run on the main schedule.

use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{self, Message};
use url::{Host, Url};

use crate::error::SocketError;

/// Runtime that owns every socket transport task.
pub(crate) static TRANSPORT: once_cell::sync::Lazy<tokio::runtime::Runtime> =
    once_cell::sync::Lazy::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(2)
            .thread_name("socket-transport")
            .build()
            .expect("Failed to build socket transport runtime")
    });

/// Connection state, numbered like the browser's `readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closed = 3,
}

impl ReadyState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            _ => ReadyState::Closed,
        }
    }
}

#[derive(Clone, Debug)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn new(state: ReadyState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    fn load(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn store(&self, state: ReadyState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

/// Notifications delivered from the transport to the main thread.
///
/// Close and error conditions have no event; they only flip the ready state
/// to [`ReadyState::Closed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    /// The handshake completed. Delivered at most once per connection.
    Open,
    /// One inbound frame, payload untouched.
    Message(String),
}

/// Cheap, cloneable handle for writing text frames.
#[derive(Clone, Debug)]
pub struct SocketSender {
    outbound: UnboundedSender<String>,
    state: SharedState,
}

impl SocketSender {
    /// Queue a text frame. Fails unless the connection is open.
    pub fn send(&self, text: impl Into<String>) -> Result<(), SocketError> {
        match self.state.load() {
            ReadyState::Open => {}
            ReadyState::Connecting => return Err(SocketError::NotOpen),
            ReadyState::Closed => return Err(SocketError::Closed),
        }
        self.outbound
            .send(text.into())
            .map_err(|_| SocketError::Closed)
    }

    pub fn ready_state(&self) -> ReadyState {
        self.state.load()
    }

    /// A sender that is not backed by a connection, for exercising handlers.
    #[cfg(test)]
    pub(crate) fn detached(state: ReadyState) -> (Self, UnboundedReceiver<String>) {
        let (outbound, receiver) = unbounded_channel();
        (
            Self {
                outbound,
                state: SharedState::new(state),
            },
            receiver,
        )
    }
}

/// The single long-lived connection to the demo endpoint.
pub struct SocketClient {
    endpoint: Url,
    sender: SocketSender,
    events: Mutex<Receiver<SocketEvent>>,
}

impl SocketClient {
    /// Start connecting to `endpoint` and return immediately.
    ///
    /// Only URL problems are reported; connect and handshake failures leave
    /// the client in [`ReadyState::Closed`] without producing any event.
    pub fn connect(endpoint: &str) -> Result<Self, SocketError> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.scheme() != "ws" {
            return Err(SocketError::UnsupportedScheme(endpoint.scheme().to_string()));
        }

        let (outbound_tx, outbound_rx) = unbounded_channel::<String>();
        let (event_tx, event_rx) = mpsc::channel::<SocketEvent>();
        let state = SharedState::new(ReadyState::Connecting);

        log::debug!("[Socket] Connecting to {}", endpoint);
        TRANSPORT.spawn(run_transport(
            endpoint.clone(),
            state.clone(),
            event_tx,
            outbound_rx,
        ));

        Ok(Self {
            endpoint,
            sender: SocketSender {
                outbound: outbound_tx,
                state,
            },
            events: Mutex::new(event_rx),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn ready_state(&self) -> ReadyState {
        self.sender.ready_state()
    }

    pub fn sender(&self) -> SocketSender {
        self.sender.clone()
    }

    /// Take the next pending event without blocking.
    pub fn try_recv(&self) -> Option<SocketEvent> {
        self.events.lock().ok()?.try_recv().ok()
    }
}

async fn open_stream(endpoint: &Url) -> Result<WebSocketStream<TcpStream>, tungstenite::Error> {
    let port = endpoint.port_or_known_default().unwrap_or(80);

    // `host_str` keeps the brackets around IPv6 literals, so match on the parsed host.
    let tcp_stream = match endpoint.host() {
        Some(Host::Ipv4(ip)) => TcpStream::connect((ip, port)).await?,
        Some(Host::Ipv6(ip)) => TcpStream::connect((ip, port)).await?,
        Some(Host::Domain(domain)) => TcpStream::connect((domain, port)).await?,
        None => TcpStream::connect(("localhost", port)).await?,
    };
    let request = endpoint.as_str().into_client_request()?;
    let (stream, response) = tokio_tungstenite::client_async(request, tcp_stream).await?;
    log::debug!("[Socket] Handshake complete (status: {})", response.status());
    Ok(stream)
}

async fn run_transport(
    endpoint: Url,
    state: SharedState,
    events: Sender<SocketEvent>,
    mut outbound: UnboundedReceiver<String>,
) {
    let Ok(stream) = open_stream(&endpoint).await else {
        state.store(ReadyState::Closed);
        return;
    };

    state.store(ReadyState::Open);
    if events.send(SocketEvent::Open).is_err() {
        state.store(ReadyState::Closed);
        return;
    }

    let (mut write, mut read) = stream.split();

    let send_task = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            if write.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = read.next().await {
        let payload = match frame {
            Ok(Message::Text(text)) => text.as_str().to_owned(),
            Ok(Message::Binary(data)) => String::from_utf8_lossy(&data).into_owned(),
            // The close reply is queued by tungstenite and flushed on the next
            // poll, which then ends the stream.
            Ok(Message::Close(_)) => continue,
            Err(_) => break,
            // Ping/pong are answered by tungstenite.
            Ok(_) => continue,
        };
        if events.send(SocketEvent::Message(payload)).is_err() {
            break;
        }
    }

    state.store(ReadyState::Closed);
    send_task.abort();
}
