// Socket-level tests: a real client against a served router, checking the
// bridge between the WebSocket and the hall loop's channels.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;

use museum_server::interface_adapters::net::ws_handler;
use museum_server::interface_adapters::state::AppState;
use museum_server::use_cases::{HallEvent, HallUpdate, MuseumEvent};

struct Server {
    addr: std::net::SocketAddr,
    input_rx: mpsc::Receiver<HallEvent>,
    hall_tx: broadcast::Sender<HallUpdate>,
}

async fn serve() -> Server {
    let (input_tx, input_rx) = mpsc::channel(64);
    let (hall_tx, _) = broadcast::channel::<HallUpdate>(64);
    let (event_tx, _) = broadcast::channel::<MuseumEvent>(64);
    let state = Arc::new(AppState {
        input_tx,
        hall_tx: hall_tx.clone(),
        event_tx,
    });
    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Server {
        addr,
        input_rx,
        hall_tx,
    }
}

#[tokio::test]
async fn a_client_message_reaches_the_loop_and_snapshots_flow_back() {
    let mut server = serve().await;
    let (mut ws, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("connect");

    ws.send(Message::Text(
        r#"{"type":"SetVolume","data":{"volume":0.5}}"#.into(),
    ))
    .await
    .expect("send");

    let event = tokio::time::timeout(Duration::from_secs(5), server.input_rx.recv())
        .await
        .expect("input before timeout")
        .expect("input channel open");
    assert!(matches!(
        event,
        HallEvent::VolumeChanged { volume } if (volume - 0.5).abs() < f32::EPSILON
    ));

    // The loop has the message, so the connection is subscribed; a broadcast
    // snapshot must reach the client as a tagged frame.
    server
        .hall_tx
        .send(HallUpdate {
            tick: 7,
            guests: Vec::new(),
        })
        .expect("client subscribed");

    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return text,
                Some(Ok(_)) => {}
                other => panic!("unexpected socket state: {other:?}"),
            }
        }
    })
    .await
    .expect("snapshot before timeout");
    assert!(frame.contains(r#""type":"HallUpdate""#));
    assert!(frame.contains(r#""tick":7"#));
}

#[tokio::test]
async fn repeated_invalid_json_closes_the_connection_with_a_policy_code() {
    let mut server = serve().await;
    let (mut ws, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("connect");

    for _ in 0..11 {
        ws.send(Message::Text("not json".into()))
            .await
            .expect("send");
    }

    let close = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(frame))) => return frame,
                Some(Ok(_)) => {}
                Some(Err(e)) => panic!("socket error before close: {e}"),
                None => panic!("socket ended without a close frame"),
            }
        }
    })
    .await
    .expect("close before timeout");

    let frame = close.expect("close carries a frame");
    assert_eq!(frame.code, CloseCode::Policy);
    assert_eq!(frame.reason.as_str(), "too many invalid messages");

    // Nothing the client sent should have reached the loop.
    assert!(server.input_rx.try_recv().is_err());
}
