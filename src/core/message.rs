use crate::catalog::ProductRecord;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Role name used in completion prompts.
    pub fn prompt_role(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "assistant",
        }
    }

    pub fn from_prompt_role(role: &str) -> Self {
        if role == "user" {
            Sender::User
        } else {
            Sender::Bot
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub is_product_message: bool,
    pub products: Vec<ProductRecord>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    pub fn product_list(text: impl Into<String>, products: Vec<ProductRecord>) -> Self {
        Self {
            is_product_message: true,
            products,
            ..Self::bot(text)
        }
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            is_product_message: false,
            products: Vec::new(),
        }
    }
}

/// Which responder produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Filtered product list from the catalog.
    Local,
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub message: ChatMessage,
    pub source: ReplySource,
}

impl BotReply {
    pub fn text(&self) -> &str {
        &self.message.text
    }

    pub fn is_product_list(&self) -> bool {
        self.message.is_product_message
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.message.products
    }
}
