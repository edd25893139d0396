use std::sync::Arc;
use std::time::Duration;

use super::fallback::fallback;
use super::message::{BotReply, ChatMessage, ReplySource};
use crate::ai::{CompletionError, CompletionRequest, CompletionService, PromptMessage};
use crate::catalog::Catalog;
use crate::config::{Config, REMOTE_TIMEOUT, STOREFRONT_DOMAIN, STOREFRONT_URL};

/// Words that mark a question as shopping-related.
pub const PRODUCT_INTENT_KEYWORDS: &[&str] = &[
    "product", "buy", "shop", "price", "kit", "bundle", "cream", "serum", "oil", "wash", "treat",
    "care", "mask", "shampoo",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&Config> for CompletionSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.llm_model.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        }
    }
}

/// Answers free-text questions through the completion service, falling back
/// to canned answers when the service is missing, failing or silent.
pub struct RemoteResponder {
    service: Option<Arc<dyn CompletionService>>,
    catalog: Arc<Catalog>,
    settings: CompletionSettings,
    timeout: Duration,
}

impl RemoteResponder {
    pub fn new(
        service: Option<Arc<dyn CompletionService>>,
        catalog: Arc<Catalog>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            service,
            catalog,
            settings,
            timeout: REMOTE_TIMEOUT,
        }
    }

    pub fn is_available(&self) -> bool {
        self.service.is_some()
    }

    /// Model name recorded with archived sessions.
    pub fn model_label(&self) -> &str {
        if self.is_available() {
            &self.settings.model
        } else {
            "offline"
        }
    }

    /// Always yields a reply; service trouble only changes where it comes from.
    pub async fn ask_assistant(
        &self,
        user_text: &str,
        recent_transcript: &[ChatMessage],
        archived_history: &[ChatMessage],
    ) -> BotReply {
        let Some(service) = &self.service else {
            log::debug!("📡 No completion service configured, using canned answers");
            return fallback_reply(user_text);
        };

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: build_prompt(
                &system_instruction(&self.catalog),
                archived_history,
                recent_transcript,
                user_text,
            ),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let outcome = match tokio::time::timeout(self.timeout, service.complete(&request)).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout),
        };

        match outcome {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    log::warn!("⚠️ Completion service returned an empty answer");
                    return fallback_reply(user_text);
                }
                log::debug!("📡 Answer from completion service");
                BotReply {
                    message: ChatMessage::bot(finish_reply(text, user_text)),
                    source: ReplySource::Remote,
                }
            }
            Err(e) => {
                log::warn!("⚠️ Completion service unavailable: {}", e);
                fallback_reply(user_text)
            }
        }
    }
}

fn fallback_reply(user_text: &str) -> BotReply {
    BotReply {
        message: ChatMessage::bot(fallback(user_text)),
        source: ReplySource::Fallback,
    }
}

pub fn system_instruction(catalog: &Catalog) -> String {
    format!(
        "You are the Premium Assistant for Pakeeza Products.\n\
        \n\
        GOAL: BE SHORT, FAST, AND DIRECT.\n\
        \n\
        INSTRUCTIONS:\n\
        1. If the user mentions a concern (e.g. \"Acne\", \"Hair fall\", \"Whitening\"), \
        recommend 2-3 matching products from the catalog right away. Do not ask long follow-up questions.\n\
        2. If a requested product is not in the catalog, simply say: \
        \"Currently out of stock here. Please visit {url}\".\n\
        3. If the user names a broad category (\"Skin care\"), ask a 3-4 word clarification \
        (e.g. \"For Acne, Glow, or Anti-aging?\").\n\
        4. Recommendation format: Product Name - Price. Keep it brief.\n\
        \n\
        CATALOG: {catalog}",
        url = STOREFRONT_URL,
        catalog = catalog.to_prompt_json(),
    )
}

/// System turn, then archived sessions, then the current session, then the new question.
pub fn build_prompt(
    system: &str,
    archived_history: &[ChatMessage],
    recent_transcript: &[ChatMessage],
    user_text: &str,
) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(archived_history.len() + recent_transcript.len() + 2);
    messages.push(PromptMessage::new("system", system));
    messages.extend(
        archived_history
            .iter()
            .chain(recent_transcript)
            .map(|m| PromptMessage::new(m.sender.prompt_role(), m.text.clone())),
    );
    messages.push(PromptMessage::new("user", user_text));
    messages
}

pub fn is_product_inquiry(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    PRODUCT_INTENT_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Appends a pointer to the storefront unless the answer already links it.
pub fn finish_reply(answer: &str, user_text: &str) -> String {
    let lower = answer.to_lowercase();
    if lower.contains(STOREFRONT_DOMAIN) {
        return answer.to_string();
    }

    if is_product_inquiry(user_text) {
        format!("{answer}\n\nYou can also browse our full collection at: {STOREFRONT_URL}")
    } else if !lower.contains("category") && !lower.contains("product") {
        format!("{answer}\n\nYou can browse our product categories above or visit: {STOREFRONT_URL}")
    } else {
        answer.to_string()
    }
}
