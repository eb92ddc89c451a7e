//! Tag-based matchmaking chat server.
//!
//! Matches clients who declare the same tag with compatible gender preferences,
//! then relays their messages through private pair rooms. Also hosts group
//! chat rooms with optional password protection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin enishi-server
//! cargo run --bin enishi-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin enishi-server -- --blacklist words.txt
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use enishi_server::{
    domain::Blacklist,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryGroupRoomRepository, InMemoryMatchmakingRepository},
    },
    ui::server::Server,
    usecase::{
        ConnectClientUseCase, CreateGroupRoomUseCase, DeclareTagUseCase, DisconnectClientUseCase,
        JoinGroupRoomUseCase, ListGroupRoomsUseCase, SendMessageUseCase,
    },
};
use enishi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "enishi-server")]
#[command(about = "Tag-based matchmaking chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Path to a moderation blacklist file (one word per line)
    #[arg(long)]
    blacklist: Option<PathBuf>,
}

/// Loads the moderation blacklist from a file, falling back to the built-in list.
fn load_blacklist(path: Option<&PathBuf>) -> Blacklist {
    match path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => {
                let blacklist = Blacklist::from_words(content.lines());
                tracing::info!(
                    "Loaded {} blacklist words from {}",
                    blacklist.len(),
                    path.display()
                );
                blacklist
            }
            Err(e) => {
                tracing::error!("Failed to read blacklist file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Blacklist::builtin(),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory)
    let matchmaking_repository = Arc::new(InMemoryMatchmakingRepository::new());
    let group_room_repository = Arc::new(InMemoryGroupRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let blacklist = Arc::new(load_blacklist(args.blacklist.as_ref()));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        matchmaking_repository.clone(),
        message_pusher.clone(),
    ));
    let declare_tag_usecase = Arc::new(DeclareTagUseCase::new(
        matchmaking_repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        matchmaking_repository.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        matchmaking_repository.clone(),
        group_room_repository.clone(),
        message_pusher.clone(),
        blacklist,
    ));
    let create_group_room_usecase =
        Arc::new(CreateGroupRoomUseCase::new(group_room_repository.clone()));
    let list_group_rooms_usecase =
        Arc::new(ListGroupRoomsUseCase::new(group_room_repository.clone()));
    let join_group_room_usecase = Arc::new(JoinGroupRoomUseCase::new(group_room_repository));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        declare_tag_usecase,
        disconnect_client_usecase,
        send_message_usecase,
        create_group_room_usecase,
        list_group_rooms_usecase,
        join_group_room_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
