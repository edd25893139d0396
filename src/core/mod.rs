pub mod agent;
pub mod category;
pub mod fallback;
pub mod local;
pub mod message;
pub mod remote;

pub use agent::StorefrontAgent;
pub use message::{BotReply, ChatMessage, Sender};
