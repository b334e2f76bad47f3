use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use sensei_types::events::ChangeEvent;

use crate::dispatcher::Dispatcher;

/// Heartbeat interval: server sends a Ping every 15 seconds.
/// If 2 consecutive Pongs are missed (~30s), the connection is dropped.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// User-owned events only reach the owner's feed; anonymous feeds never see them.
pub fn should_deliver(event: &ChangeEvent, viewer: Option<Uuid>) -> bool {
    match event.owner() {
        Some(owner) => viewer == Some(owner),
        None => true,
    }
}

/// Relay change events to one WebSocket client until either side goes away.
/// `viewer` is the user the client identified as, if any.
pub async fn handle_connection(socket: WebSocket, dispatcher: Dispatcher, viewer: Option<Uuid>) {
    let (mut sender, mut receiver) = socket.split();

    info!(?viewer, "Feed client connected");

    let mut broadcast_rx = dispatcher.subscribe();

    let pong_received = Arc::new(AtomicBool::new(true));
    let pong_flag_send = pong_received.clone();
    let pong_flag_recv = pong_received;

    let mut send_task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        heartbeat.tick().await;
        let mut missed_heartbeats: u8 = 0;

        loop {
            tokio::select! {
                result = broadcast_rx.recv() => {
                    let event = match result {
                        Ok(event) => event,
                        Err(RecvError::Lagged(n)) => {
                            warn!("Feed receiver lagged by {} events", n);
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };

                    if !should_deliver(&event, viewer) {
                        continue;
                    }

                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!("Failed to encode change event: {}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                _ = heartbeat.tick() => {
                    if pong_flag_send.swap(false, Ordering::Acquire) {
                        missed_heartbeats = 0;
                    } else {
                        missed_heartbeats += 1;
                        if missed_heartbeats >= 2 {
                            warn!("Heartbeat timeout (missed {} pongs), dropping connection", missed_heartbeats);
                            break;
                        }
                    }
                    if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // The feed is push-only; inbound frames just keep the heartbeat alive
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Pong(_) => pong_flag_recv.store(true, Ordering::Release),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!(?viewer, "Feed client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_results_only_reach_their_owner() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let event = ChangeEvent::QuizResultCreate { id: Uuid::new_v4(), user_id: alice };

        assert!(should_deliver(&event, Some(alice)));
        assert!(!should_deliver(&event, Some(bob)));
        assert!(!should_deliver(&event, None));
    }

    #[test]
    fn shared_events_reach_everyone() {
        let event = ChangeEvent::AnnouncementCreate { id: Uuid::new_v4() };
        assert!(should_deliver(&event, None));
        assert!(should_deliver(&event, Some(Uuid::new_v4())));
    }
}
