use std::sync::Arc;

use actix_web::{get, web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::monitor::notifier::RoomRegistry;

const JOIN_ROOM_EVENT: &str = "join-room";

#[derive(Deserialize)]
struct ClientEvent {
    event: String,
    role: String,
}

/// Returns the room to join when the frame is a well-formed join-room
/// event. Anything else is ignored, as the original server did with
/// unrecognised socket events.
fn parse_join(frame: &str) -> Option<String> {
    let event: ClientEvent = serde_json::from_str(frame).ok()?;
    (event.event == JOIN_ROOM_EVENT).then_some(event.role)
}

/// Dashboard socket endpoint. After the upgrade the client announces its
/// role with a join-room frame; from then on the connection receives every
/// event broadcast to that room until it disconnects.
#[get("/ws")]
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    rooms: web::Data<RoomRegistry>,
) -> actix_web::Result<HttpResponse> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    actix_rt::spawn(run_session(rooms.into_inner(), session, stream));
    Ok(response)
}

async fn run_session(rooms: Arc<RoomRegistry>, mut session: Session, mut stream: MessageStream) {
    let conn_id = rooms.allocate_id();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    log::info!("dashboard connected: {}", conn_id);

    loop {
        tokio::select! {
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(room) = parse_join(&text) {
                            rooms.join(&room, conn_id, tx.clone());
                        }
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            event = rx.recv() => {
                match event {
                    Some(text) => {
                        // Fire-and-forget: a send failure means the peer is
                        // gone, not that the event should be retried.
                        if session.text(text).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    rooms.leave(conn_id);
    let _ = session.close(None).await;
    log::info!("dashboard disconnected: {}", conn_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_frames_are_recognised() {
        assert_eq!(
            parse_join(r#"{"event": "join-room", "role": "admin"}"#),
            Some("admin".to_string())
        );
        assert_eq!(
            parse_join(r#"{"event": "join-room", "role": "tl"}"#),
            Some("tl".to_string())
        );
    }

    #[test]
    fn other_frames_are_ignored() {
        assert_eq!(parse_join(r#"{"event": "leave-room", "role": "admin"}"#), None);
        assert_eq!(parse_join("not json"), None);
        assert_eq!(parse_join(r#"{"event": "join-room"}"#), None);
    }
}
