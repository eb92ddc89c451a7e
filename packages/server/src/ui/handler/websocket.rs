//! WebSocket connection handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, Gender, MessageContent, PusherChannel, RoomId, RoomName, Tag, TagOutcome},
    infrastructure::dto::websocket::{
        ActiveUsersCountMessage, ChatRoomsListMessage, ClientEvent, CreateRoomSuccessMessage,
        ErrorCode, ErrorMessage, GenderCountMessage, GroupRoomSnapshotDto, GroupRoomSummaryDto,
        JoinRoomErrorMessage, JoinRoomSuccessMessage, MatchedMessage, MessageType, PeerLeftMessage,
        RelayedMessage,
    },
    ui::state::AppState,
    usecase::ConnectError,
};

use serde::Deserialize;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub client_id: String,
    pub gender: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let client_id_str = query.client_id;

    // Convert String -> ClientId (Domain Model)
    let client_id = match ClientId::try_from(client_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid client_id format: '{}'", client_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Gender defaults to "unspecified" when the query parameter is absent
    let gender = match query.gender.as_deref() {
        None => Gender::Unspecified,
        Some(s) => match Gender::from_str(s) {
            Ok(g) => g,
            Err(_) => {
                tracing::warn!("Invalid gender value: '{}'", s);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
    };

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let reply_tx = tx.clone();

    // Use ConnectClientUseCase to handle connection
    // (register_client is called inside the UseCase)
    let client_id_for_handle = client_id.clone();
    match state
        .connect_client_usecase
        .execute(client_id, gender, tx)
        .await
    {
        Ok(()) => Ok(ws.on_upgrade(move |socket| {
            handle_socket(socket, state, client_id_for_handle, rx, reply_tx)
        })),
        Err(ConnectError::DuplicateClientId(_)) => {
            tracing::warn!(
                "Client with ID '{}' is already connected. Rejecting connection.",
                client_id_str
            );
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Broadcasts the current presence counters to every connected client.
async fn broadcast_presence(state: &AppState) {
    let (count, genders) = state.connect_client_usecase.presence_snapshot().await;

    let count_msg = ActiveUsersCountMessage {
        r#type: MessageType::ActiveUsersCount,
        count,
    };
    let count_json = serde_json::to_string(&count_msg).unwrap();
    state.connect_client_usecase.broadcast_to_all(&count_json).await;

    let gender_msg = GenderCountMessage {
        r#type: MessageType::GenderCount,
        male: genders.male,
        female: genders.female,
    };
    let gender_json = serde_json::to_string(&gender_msg).unwrap();
    state
        .connect_client_usecase
        .broadcast_to_all(&gender_json)
        .await;
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    client_id: ClientId,
    rx: mpsc::UnboundedReceiver<String>,
    reply_tx: PusherChannel,
) {
    let (sender, mut receiver) = socket.split();

    // Let everyone (including this client) see the updated counters
    broadcast_presence(&state).await;

    let state_clone = state.clone();
    let client_id_clone = client_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Failed to parse event from '{}': {}",
                                client_id_clone.as_str(),
                                e
                            );
                            push_error(&reply_tx, ErrorCode::MalformedRequest);
                            continue;
                        }
                    };

                    handle_event(&state_clone, &client_id_clone, &reply_tx, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", client_id_clone.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive messages from other clients and send to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectClientUseCase to clean up all of this client's state
    let outcome = state.disconnect_client_usecase.execute(&client_id).await;

    if let Some(partner) = outcome.former_partner {
        let left_msg = PeerLeftMessage {
            r#type: MessageType::PeerLeft,
            client_id: client_id.as_str().to_string(),
        };
        let left_json = serde_json::to_string(&left_msg).unwrap();
        state
            .disconnect_client_usecase
            .notify_peer_left(&partner, &left_json)
            .await;
    }

    broadcast_presence(&state).await;
}

/// Pushes a generic error notification back to this client.
fn push_error(reply_tx: &PusherChannel, code: ErrorCode) {
    let msg = ErrorMessage {
        r#type: MessageType::Error,
        code,
    };
    let json = serde_json::to_string(&msg).unwrap();
    let _ = reply_tx.send(json);
}

/// Dispatches a parsed client event to the matching UseCase.
async fn handle_event(
    state: &AppState,
    client_id: &ClientId,
    reply_tx: &PusherChannel,
    event: ClientEvent,
) {
    match event {
        ClientEvent::DeclareTag {
            tag,
            gender,
            desired_partner_gender,
        } => {
            // Convert String -> Tag (Domain Model)
            let tag = match Tag::new(tag) {
                Ok(tag) => tag,
                Err(e) => {
                    tracing::warn!("Invalid tag from '{}': {}", client_id.as_str(), e);
                    push_error(reply_tx, ErrorCode::MalformedRequest);
                    return;
                }
            };

            let outcome = state
                .declare_tag_usecase
                .execute(client_id.clone(), tag, gender, desired_partner_gender)
                .await;

            match outcome {
                TagOutcome::Queued => {
                    // Nothing to tell the client until a partner shows up
                }
                TagOutcome::Paired { partner, room_id } => {
                    let client_msg = MatchedMessage {
                        r#type: MessageType::Matched,
                        room_id: room_id.as_str().to_string(),
                        matched_peer_id: partner.as_str().to_string(),
                    };
                    let partner_msg = MatchedMessage {
                        r#type: MessageType::Matched,
                        room_id: room_id.as_str().to_string(),
                        matched_peer_id: client_id.as_str().to_string(),
                    };
                    state
                        .declare_tag_usecase
                        .notify_matched(
                            client_id,
                            &serde_json::to_string(&client_msg).unwrap(),
                            &partner,
                            &serde_json::to_string(&partner_msg).unwrap(),
                        )
                        .await;
                }
                TagOutcome::AlreadyPaired => {
                    push_error(reply_tx, ErrorCode::AlreadyPaired);
                }
            }
        }
        ClientEvent::CreateRoom {
            name,
            is_locked,
            password,
        } => {
            let name = match RoomName::new(name) {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Invalid room name from '{}': {}", client_id.as_str(), e);
                    push_error(reply_tx, ErrorCode::MalformedRequest);
                    return;
                }
            };

            match state
                .create_group_room_usecase
                .execute(name, is_locked, password, client_id.clone())
                .await
            {
                Ok(room) => {
                    let msg = CreateRoomSuccessMessage {
                        r#type: MessageType::CreateRoomSuccess,
                        room: GroupRoomSnapshotDto::from(&room),
                    };
                    let _ = reply_tx.send(serde_json::to_string(&msg).unwrap());
                }
                Err(e) => {
                    tracing::warn!("Failed to create room for '{}': {}", client_id.as_str(), e);
                    push_error(reply_tx, ErrorCode::MalformedRequest);
                }
            }
        }
        ClientEvent::ListRooms => {
            let rooms = state.list_group_rooms_usecase.execute().await;

            // Domain Model から DTO への変換
            let summaries: Vec<GroupRoomSummaryDto> =
                rooms.iter().map(GroupRoomSummaryDto::from).collect();
            let msg = ChatRoomsListMessage {
                r#type: MessageType::ChatRoomsList,
                rooms: summaries,
            };
            let _ = reply_tx.send(serde_json::to_string(&msg).unwrap());
        }
        ClientEvent::JoinRoom { room_id, password } => {
            let room_id = match RoomId::new(room_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Invalid room id from '{}': {}", client_id.as_str(), e);
                    push_error(reply_tx, ErrorCode::MalformedRequest);
                    return;
                }
            };

            match state
                .join_group_room_usecase
                .execute(&room_id, password, client_id.clone())
                .await
            {
                Ok(room) => {
                    let msg = JoinRoomSuccessMessage {
                        r#type: MessageType::JoinRoomSuccess,
                        room: GroupRoomSnapshotDto::from(&room),
                    };
                    let _ = reply_tx.send(serde_json::to_string(&msg).unwrap());
                }
                Err(e) => {
                    let msg = JoinRoomErrorMessage {
                        r#type: MessageType::JoinRoomError,
                        reason: e.to_string(),
                    };
                    let _ = reply_tx.send(serde_json::to_string(&msg).unwrap());
                }
            }
        }
        ClientEvent::SendMessage { message, room_id } => {
            relay_message(state, client_id, reply_tx, message, room_id, RelayKind::Pair).await;
        }
        ClientEvent::SendGroupMessage { message, room_id } => {
            relay_message(state, client_id, reply_tx, message, room_id, RelayKind::Group).await;
        }
    }
}

enum RelayKind {
    Pair,
    Group,
}

/// Plans and delivers a chat message for either relay path.
async fn relay_message(
    state: &AppState,
    client_id: &ClientId,
    reply_tx: &PusherChannel,
    message: String,
    room_id: String,
    kind: RelayKind,
) {
    // Convert String -> Domain Models
    let room_id = match RoomId::new(room_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid room id from '{}': {}", client_id.as_str(), e);
            push_error(reply_tx, ErrorCode::MalformedRequest);
            return;
        }
    };
    let content = match MessageContent::new(message) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Invalid message from '{}': {}", client_id.as_str(), e);
            push_error(reply_tx, ErrorCode::MalformedRequest);
            return;
        }
    };

    let plan = match kind {
        RelayKind::Pair => {
            state
                .send_message_usecase
                .plan_pair_message(client_id, &room_id, &content)
                .await
        }
        RelayKind::Group => {
            state
                .send_message_usecase
                .plan_group_message(client_id, &room_id, &content)
                .await
        }
    };

    match plan {
        Ok(plan) => {
            let msg = RelayedMessage {
                r#type: MessageType::Message,
                sender: client_id.as_str().to_string(),
                message: plan.censored_text,
            };
            let json = serde_json::to_string(&msg).unwrap();
            state
                .send_message_usecase
                .deliver(client_id, plan.recipients, &json)
                .await;
        }
        Err(e) => {
            tracing::warn!(
                "Failed to relay message from '{}': {}",
                client_id.as_str(),
                e
            );
            push_error(reply_tx, ErrorCode::RoomNotFound);
        }
    }
}
