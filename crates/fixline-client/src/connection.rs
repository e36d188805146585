// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket connection to the gateway's chat transport.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use fixline_core::events::{ClientEvent, ServerEvent};
use fixline_core::types::Identity;
use fixline_core::FixlineError;

/// A joined chat connection.
///
/// Connecting sends the join event immediately, so by the time the handle
/// is returned the server routes messages for `identity` here. Reconnect
/// is the caller's responsibility; joining again is always safe.
pub struct ChatConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    identity: Identity,
}

impl ChatConnection {
    /// Connect to `url` (a `ws://` endpoint) and join as `identity`.
    pub async fn connect(url: &str, identity: Identity) -> Result<Self, FixlineError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| FixlineError::Transport {
                message: format!("failed to connect to {url}"),
                source: Some(Box::new(e)),
            })?;

        let mut conn = Self { stream, identity };
        let join = ClientEvent::Join {
            identity: conn.identity.to_string(),
        };
        conn.send(&join).await?;
        tracing::debug!(identity = %conn.identity, "joined chat transport");
        Ok(conn)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Send a client event as a JSON text frame.
    pub async fn send(&mut self, event: &ClientEvent) -> Result<(), FixlineError> {
        let text = serde_json::to_string(event).map_err(|e| FixlineError::Transport {
            message: "failed to serialize client event".to_string(),
            source: Some(Box::new(e)),
        })?;
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| FixlineError::Transport {
                message: "failed to send client event".to_string(),
                source: Some(Box::new(e)),
            })
    }

    /// Receive the next server event.
    ///
    /// Unparseable frames are logged and skipped. `None` means the server
    /// closed the connection.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>, FixlineError> {
        while let Some(frame) = self.stream.next().await {
            let frame = frame.map_err(|e| FixlineError::Transport {
                message: "chat transport read error".to_string(),
                source: Some(Box::new(e)),
            })?;
            match frame {
                Message::Text(text) => match serde_json::from_str::<ServerEvent>(text.as_str()) {
                    Ok(event) => return Ok(Some(event)),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unparseable server frame");
                    }
                },
                Message::Close(_) => return Ok(None),
                _ => {} // Ping/pong handled by the tungstenite layer.
            }
        }
        Ok(None)
    }

    /// Close the connection cleanly.
    pub async fn close(mut self) -> Result<(), FixlineError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| FixlineError::Transport {
                message: "failed to close chat transport".to_string(),
                source: Some(Box::new(e)),
            })
    }
}
