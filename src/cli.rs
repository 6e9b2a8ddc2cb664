use clap::{Parser, Subcommand};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";

#[derive(Parser)]
#[command(name = "chatwatch")]
#[command(version)]
#[command(about = "Terminal live view for a chat/todo demo API")]
pub struct Args {
    #[command(subcommand)]
    pub mode: Option<Mode>,

    /// Base URL of the HTTP API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// WebSocket feed URL (derived from --api-url when left at the default)
    #[arg(long, default_value = DEFAULT_WS_URL)]
    pub ws_url: String,

    /// Left-side conversation participant id
    #[arg(long, default_value_t = 1)]
    pub user_a: i64,

    /// Right-side conversation participant id
    #[arg(long, default_value_t = 2)]
    pub user_b: i64,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Live conversation view for the two participants (default)
    Chat,
    /// Live todo list view
    Todos,
    /// One-shot GET / of the API, printing the status line and body
    Ping,
}

/// Pick the feed URL: when the user moved the API but left `--ws-url` at
/// its default, follow the API host instead of silently pointing the feed
/// at localhost.
pub fn resolve_ws_url(api_url: &str, ws_url: &str) -> String {
    if ws_url != DEFAULT_WS_URL || api_url == DEFAULT_API_URL {
        return ws_url.to_string();
    }
    let derived = if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return ws_url.to_string();
    };
    format!("{}/ws", derived.trim_end_matches('/'))
}
