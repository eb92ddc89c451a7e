//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    ConnectClientUseCase, CreateGroupRoomUseCase, DeclareTagUseCase, DisconnectClientUseCase,
    JoinGroupRoomUseCase, ListGroupRoomsUseCase, SendMessageUseCase,
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Matchmaking chat server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     declare_tag_usecase,
///     disconnect_client_usecase,
///     send_message_usecase,
///     create_group_room_usecase,
///     list_group_rooms_usecase,
///     join_group_room_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DeclareTagUseCase（タグ申告のユースケース）
    declare_tag_usecase: Arc<DeclareTagUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// CreateGroupRoomUseCase（グループルーム作成のユースケース）
    create_group_room_usecase: Arc<CreateGroupRoomUseCase>,
    /// ListGroupRoomsUseCase（グループルーム一覧のユースケース）
    list_group_rooms_usecase: Arc<ListGroupRoomsUseCase>,
    /// JoinGroupRoomUseCase（グループルーム参加のユースケース）
    join_group_room_usecase: Arc<JoinGroupRoomUseCase>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        declare_tag_usecase: Arc<DeclareTagUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        create_group_room_usecase: Arc<CreateGroupRoomUseCase>,
        list_group_rooms_usecase: Arc<ListGroupRoomsUseCase>,
        join_group_room_usecase: Arc<JoinGroupRoomUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            declare_tag_usecase,
            disconnect_client_usecase,
            send_message_usecase,
            create_group_room_usecase,
            list_group_rooms_usecase,
            join_group_room_usecase,
        }
    }

    /// Run the matchmaking chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            declare_tag_usecase: self.declare_tag_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            send_message_usecase: self.send_message_usecase,
            create_group_room_usecase: self.create_group_room_usecase,
            list_group_rooms_usecase: self.list_group_rooms_usecase,
            join_group_room_usecase: self.join_group_room_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Matchmaking chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
