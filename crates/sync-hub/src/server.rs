//! WebSocket transport for the hub.
//!
//! Each socket becomes one hub session. A spawned writer drains the
//! session's queue onto the socket while the handler task reads frames and
//! submits updates.

use crate::error::HubResult;
use crate::hub::{SessionHandle, SessionInbox, SyncHub, UpdateOutcome};
use crate::protocol::ClientMessage;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Path the WebSocket endpoint is mounted on.
pub const WS_PATH: &str = "/ws";

/// Router exposing the hub at [`WS_PATH`].
pub fn ws_router(hub: Arc<SyncHub>) -> Router {
    Router::new().route(WS_PATH, get(ws_handler)).with_state(hub)
}

/// Handle WebSocket upgrade.
pub async fn ws_handler(State(hub): State<Arc<SyncHub>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| serve_session(hub, socket))
}

/// Run one session until the peer goes away.
pub async fn serve_session(hub: Arc<SyncHub>, socket: WebSocket) {
    let (sender, mut receiver) = socket.split();
    let (handle, inbox) = hub.connect().into_split();
    let session_id = handle.id().clone();

    let send_task = tokio::spawn(async move {
        if let Err(e) = write_outbound(sender, inbox).await {
            debug!(error = %e, "Session writer stopped");
        }
    });

    if let Err(e) = read_inbound(&handle, &mut receiver).await {
        warn!(session_id = %session_id, error = %e, "WebSocket error");
    }

    // Disconnecting closes the queue, which ends the writer.
    drop(handle);
    send_task.abort();
}

async fn write_outbound(
    mut sender: SplitSink<WebSocket, Message>,
    mut inbox: SessionInbox,
) -> HubResult<()> {
    while let Some(message) = inbox.recv().await {
        let json = message.to_json()?;
        sender.send(Message::Text(json)).await?;
    }
    sender.close().await?;
    Ok(())
}

async fn read_inbound(
    handle: &SessionHandle,
    receiver: &mut SplitStream<WebSocket>,
) -> HubResult<()> {
    while let Some(frame) = receiver.next().await {
        match frame? {
            Message::Text(text) => match ClientMessage::from_json(&text) {
                Ok(ClientMessage::UpdateData(candidate)) => {
                    if handle.submit(candidate) == UpdateOutcome::Rejected {
                        debug!(session_id = %handle.id(), "Update dropped");
                    }
                }
                Err(e) => {
                    debug!(session_id = %handle.id(), error = %e, "Ignoring malformed frame");
                }
            },
            Message::Close(_) => {
                debug!(session_id = %handle.id(), "WebSocket closed by peer");
                break;
            }
            // Ping/pong is answered by axum; binary frames carry nothing we use.
            _ => {}
        }
    }
    Ok(())
}
