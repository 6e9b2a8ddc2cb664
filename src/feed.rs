//! Shared WebSocket feed: one receive-only connection whose text frames are
//! parsed and classified, then forwarded over a channel to the single
//! handler loop in main.
//!
//! The feed is multi-purpose (chat messages and todo updates travel over
//! the same socket), so classification happens here and each view only sees
//! the shape it cares about. Anything that is not a JSON object is dropped
//! at this layer without comment beyond a debug log.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info};

/// One classified payload off the feed. Message-like events carry a
/// `conversation_id` key; everything else that still parses as an object is
/// assumed todo-like.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Message(serde_json::Value),
    Todo(serde_json::Value),
}

/// Parse a raw text frame into a [`FeedEvent`], or `None` for noise.
pub fn classify(text: &str) -> Option<FeedEvent> {
    let payload: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(err) => {
            debug!("dropping unparseable feed frame: {err}");
            return None;
        }
    };

    let Some(object) = payload.as_object() else {
        debug!("dropping non-object feed frame");
        return None;
    };

    if object.contains_key("conversation_id") {
        Some(FeedEvent::Message(payload))
    } else {
        Some(FeedEvent::Todo(payload))
    }
}

/// Connect to `ws_url` and forward classified events into `tx` until the
/// socket or the receiver goes away. One connection per run; there is no
/// reconnect; a dead socket simply ends the live half of the view.
pub async fn run_reader(ws_url: String, tx: mpsc::UnboundedSender<FeedEvent>) {
    let (mut ws, _) = match connect_async(ws_url.as_str()).await {
        Ok(pair) => pair,
        Err(err) => {
            error!("websocket connect failed ({ws_url}): {err}");
            return;
        }
    };
    info!("websocket connected: {ws_url}");

    while let Some(frame) = ws.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => {
                if let Some(event) = classify(&text) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(WsMessage::Close(_)) => {
                info!("websocket closed by server");
                break;
            }
            // Ping/pong are answered by the library; binary frames are not
            // part of this feed's contract.
            Ok(_) => {}
            Err(err) => {
                error!("websocket error: {err}");
                break;
            }
        }
    }
}
