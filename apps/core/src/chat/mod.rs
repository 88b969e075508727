//! # Chat Module
//!
//! Scripted support chatbot with keyword-based crisis detection.
//!
//! ## Components
//! - `script`: Greeting, crisis and supportive replies, crisis keywords
//! - `crisis`: Case-insensitive keyword containment per locale
//! - `responder`: Crisis reply or uniformly random supportive reply
//! - `conversation`: Message log and crisis-alert flag
//! - `actor`: Conversation actor with delayed reply delivery

pub mod actor;
pub mod conversation;
pub mod crisis;
pub mod message;
pub mod responder;
pub mod script;

pub use actor::{ConversationHandle, ConversationMessage};
pub use conversation::{Conversation, ConversationSnapshot, PendingReply};
pub use crisis::CrisisDetector;
pub use message::{Author, ChatMessage};
pub use responder::{BotReply, ReplyKind, ResponseSelector};
pub use script::ChatScript;
