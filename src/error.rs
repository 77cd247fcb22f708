use thiserror::Error;

/// Errors surfaced while locating the display surface.
#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("no window named {0:?} to use as the display surface")]
    MissingSurface(String),
}

/// Errors surfaced by the socket client API.
///
/// Transport failures after connect are not reported here; the connection
/// just stops producing events.
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("unsupported endpoint scheme {0:?}, expected \"ws\"")]
    UnsupportedScheme(String),
    #[error("socket is not open")]
    NotOpen,
    #[error("socket transport has shut down")]
    Closed,
}
