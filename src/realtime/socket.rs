//! WebSocket connection for server-pushed notification events.
//!
//! [`NotificationSocket`] is an owned value with an explicit lifecycle:
//! nothing connects until [`connect`](NotificationSocket::connect) is
//! called, and [`disconnect`](NotificationSocket::disconnect) closes the
//! stream. Callers hold it wherever they need it; there is no global instance.

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::events::NotificationEvent;
use crate::session::Session;

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct NotificationSocket {
    url: String,
    stream: Option<Stream>,
}

impl NotificationSocket {
    /// Create an unconnected socket for `url` (e.g. `ws://host/ws`)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            stream: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Connect, passing the session token as a query parameter.
    /// Does nothing when already connected.
    pub async fn connect(&mut self, session: Option<&Session>) -> Result<(), SocketError> {
        if self.stream.is_some() {
            debug!(url = %self.url, "Socket already connected");
            return Ok(());
        }

        let url = match session {
            Some(session) => {
                let separator = if self.url.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}token={}",
                    self.url,
                    separator,
                    urlencoding::encode(&session.token)
                )
            }
            None => self.url.clone(),
        };

        let (stream, _response) = connect_async(url.as_str()).await.map_err(|e| {
            SocketError::Connection(format!("Failed to connect to {}: {e}", self.url))
        })?;

        info!(url = %self.url, "Notification socket connected");
        self.stream = Some(stream);
        Ok(())
    }

    /// Close the connection. Does nothing when not connected.
    pub async fn disconnect(&mut self) -> Result<(), SocketError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };

        stream
            .close(None)
            .await
            .map_err(|e| SocketError::Protocol(e.to_string()))?;

        info!(url = %self.url, "Notification socket disconnected");
        Ok(())
    }

    /// Wait for the next event.
    ///
    /// Returns `Ok(None)` once the server closes the connection or when not
    /// connected. Frames that are not valid events are skipped.
    pub async fn next_event(&mut self) -> Result<Option<NotificationEvent>, SocketError> {
        loop {
            let Some(stream) = self.stream.as_mut() else {
                return Ok(None);
            };

            let frame = match stream.next().await {
                Some(frame) => frame,
                None => {
                    self.stream = None;
                    return Ok(None);
                }
            };

            match frame {
                Ok(Message::Text(text)) => match NotificationEvent::parse(&text) {
                    Ok(event) => return Ok(Some(event)),
                    Err(e) => warn!("Ignoring unrecognized socket message: {}", e),
                },
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "Server closed notification socket");
                    self.stream = None;
                    return Ok(None);
                }
                Ok(Message::Binary(_)) => debug!("Ignoring binary socket frame"),
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Err(e) => {
                    self.stream = None;
                    return Err(SocketError::Protocol(e.to_string()));
                }
            }
        }
    }
}

/// Errors that can occur on the notification socket
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// Failed to establish the WebSocket connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// A protocol-level error on an established connection
    #[error("Protocol error: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconnected_socket_is_inert() {
        let mut socket = NotificationSocket::new("ws://127.0.0.1:9/ws");
        assert!(!socket.is_connected());
        assert!(socket.disconnect().await.is_ok());
        assert_eq!(socket.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        // Port 9 (discard) is closed on test hosts
        let mut socket = NotificationSocket::new("ws://127.0.0.1:9/ws");
        let err = socket.connect(None).await.unwrap_err();
        assert!(matches!(err, SocketError::Connection(_)));
        assert!(!socket.is_connected());
    }
}
