pub mod chat_reply;
pub mod chat_turn;
pub mod reference_context;
pub use chat_reply::ChatReply;
pub use chat_turn::{ChatMessage, ChatRole, ChatTurn};
pub use reference_context::ReferenceContext;
