// WebSocket handling: one connection task per client, bridging the socket to
// the hall loop's channels.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, info_span, warn, Instrument};

use crate::interface_adapters::protocol::{
    ClientMessage, HallUpdateDto, MuseumEventDto, ServerMessage,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{HallEvent, HallUpdate, MuseumEvent};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    Ws(axum::Error),
    Serialization(serde_json::Error),
    InputClosed,
    EventsClosed,
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const MAX_INVALID_JSON: u32 = 10;

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        let conn_id = uuid::Uuid::new_v4();
        let span = info_span!("conn", %conn_id);
        handle_socket(socket, state).instrument(span)
    })
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("client connected");
    if let Err(e) = run_client_loop(&mut socket, &state).await {
        warn!(error = ?e, "client loop exited with error");
    }
    info!("client disconnected");
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)
}

enum LoopControl {
    Continue,
    Disconnect,
}

async fn run_client_loop(socket: &mut WebSocket, state: &Arc<AppState>) -> Result<(), NetError> {
    // Subscribe before the first await so no tick is missed.
    let mut hall_rx = state.hall_tx.subscribe();
    let mut event_rx = state.event_tx.subscribe();
    let input_tx = state.input_tx.clone();

    let mut invalid_json: u32 = 0;
    let mut last_lag_log = Instant::now() - LOG_THROTTLE;
    let mut last_invalid_log = Instant::now() - LOG_THROTTLE;
    let mut close_frame: Option<CloseFrame> = None;

    loop {
        let disconnect = tokio::select! {
            incoming = socket.recv() => {
                match handle_incoming(
                    incoming,
                    &input_tx,
                    &mut invalid_json,
                    &mut last_invalid_log,
                    &mut close_frame,
                ) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => return Err(e),
                }
            }

            update = hall_rx.recv() => {
                match update {
                    Ok(update) => {
                        forward_update(socket, update).await.is_err()
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Ticks are full snapshots, so dropped ones are
                        // harmless; the next one catches the client up.
                        if should_log(&mut last_lag_log) {
                            warn!(missed = n, "hall updates lagged; skipping to latest");
                        }
                        false
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(NetError::EventsClosed);
                    }
                }
            }

            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        forward_event(socket, event).await.is_err()
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "museum events lagged; some notifications dropped");
                        false
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(NetError::EventsClosed);
                    }
                }
            }
        };

        if disconnect {
            // Sending the close frame is enough; axum finishes the close
            // handshake when the socket drops.
            if let Some(frame) = close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            return Ok(());
        }
    }
}

fn handle_incoming(
    incoming: Option<Result<Message, axum::Error>>,
    input_tx: &mpsc::Sender<HallEvent>,
    invalid_json: &mut u32,
    last_invalid_log: &mut Instant,
    close_frame: &mut Option<CloseFrame>,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(msg) => {
                match input_tx.try_send(HallEvent::from(msg)) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        if should_log(last_invalid_log) {
                            warn!("input channel full; dropping client message");
                        }
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        return Err(NetError::InputClosed);
                    }
                }
                Ok(LoopControl::Continue)
            }
            Err(parse_err) => {
                *invalid_json += 1;
                if should_log(last_invalid_log) {
                    warn!(
                        bytes = text.len(),
                        error = %parse_err,
                        "failed to parse client message"
                    );
                }
                if *invalid_json > MAX_INVALID_JSON {
                    *close_frame = Some(CloseFrame {
                        code: close_code::POLICY,
                        reason: "too many invalid messages".into(),
                    });
                    return Ok(LoopControl::Disconnect);
                }
                Ok(LoopControl::Continue)
            }
        },
        Some(Ok(Message::Binary(_))) => {
            *close_frame = Some(CloseFrame {
                code: close_code::UNSUPPORTED,
                reason: "binary messages not supported".into(),
            });
            Ok(LoopControl::Disconnect)
        }
        Some(Ok(Message::Ping(_) | Message::Pong(_))) => Ok(LoopControl::Continue),
        Some(Ok(Message::Close(_))) => Ok(LoopControl::Disconnect),
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => Ok(LoopControl::Disconnect),
    }
}

async fn forward_update(socket: &mut WebSocket, update: HallUpdate) -> Result<(), NetError> {
    let msg = ServerMessage::HallUpdate(HallUpdateDto::from(update));
    if let Err(err) = send_message(socket, &msg).await {
        warn!(error = ?err, "failed to send hall update");
        return Err(err);
    }
    Ok(())
}

async fn forward_event(socket: &mut WebSocket, event: MuseumEvent) -> Result<(), NetError> {
    let msg = ServerMessage::Event(MuseumEventDto::from(event));
    if let Err(err) = send_message(socket, &msg).await {
        warn!(error = ?err, "failed to send museum event");
        return Err(err);
    }
    Ok(())
}
