// Gateway module for transports - follows the Train Station Pattern
// Bindings decode and encode; all decisions live in crate::gateway

mod http;
mod wire;
mod ws;

pub use http::{router, run_http, serve, status_for, ModelInfoResponse};
pub use wire::{
    decode_current, decode_legacy, decode_query, ChatRequest, ChatResponse, DecodeStrategy,
    LegacyChatRequest, PullRequest, HTTP_STRATEGIES, SESSION_STRATEGIES,
};
pub use ws::{encode_reply, handle_ws_upgrade};
