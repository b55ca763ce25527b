//! Chat-style shell over the questionnaire: per-session transcripts kept in
//! a pluggable store and an HTTP router to drive them.

pub mod router;
pub mod service;
pub mod store;

pub use router::chat_router;
pub use service::{
    render_results, ChatError, ChatMessage, ChatService, ChatSession, ChatSessionView, Role,
    GREETING, INVALID_CHOICE_WARNING,
};
pub use store::{SessionId, SessionStore, StoreError};
