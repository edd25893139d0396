use std::sync::Arc;

use uuid::Uuid;

use super::category::is_quick_option;
use super::local::build_category_reply;
use super::message::{BotReply, ChatMessage};
use super::remote::{CompletionSettings, RemoteResponder};
use crate::ai::{CompletionService, OpenAIClient};
use crate::catalog::Catalog;
use crate::config::{Config, DEFAULT_HISTORY_LIMIT};
use crate::services::SQLiteStorage;

pub const WELCOME_TEXT: &str = "Hello! Welcome to Pakeeza Products! How can I assist you today?";
pub const FRESH_SESSION_TEXT: &str = "Hello! I've started a fresh session for you. \
I still remember our previous conversation if you need anything related to it. How can I help you now?";

/// One chat window: the visible transcript plus everything archived before it.
///
/// Methods take `&mut self`, so turns run one at a time and the transcript
/// grows in send/receive order.
pub struct StorefrontAgent {
    catalog: Arc<Catalog>,
    remote: RemoteResponder,
    transcript: Vec<ChatMessage>,
    archived_history: Vec<ChatMessage>,
    storage: Option<SQLiteStorage>,
    session_id: String,
    history_limit: usize,
}

impl StorefrontAgent {
    /// Wires the completion client, catalog and optional history store from `config`.
    pub fn from_config(config: &Config, catalog: Catalog) -> Self {
        let service: Option<Arc<dyn CompletionService>> = config.api_key.as_ref().and_then(|key| {
            match OpenAIClient::new(key.clone(), &config.llm_base_url) {
                Ok(client) if client.is_configured() => Some(Arc::new(client) as Arc<dyn CompletionService>),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("⚠️ Completion client unavailable: {}", e);
                    None
                }
            }
        });

        if service.is_some() {
            log::info!("📡 Using completion model {}", config.llm_model);
        } else {
            log::info!("📡 No API key configured, answering from canned responses");
        }

        let storage = if config.persist_history {
            match SQLiteStorage::new(config.history_db_path.clone()) {
                Ok(s) => Some(s.with_history_limit(config.history_limit)),
                Err(e) => {
                    log::warn!("⚠️ History storage unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self::new(service, catalog, CompletionSettings::from(config), storage)
            .with_history_limit(config.history_limit)
    }

    pub fn new(
        service: Option<Arc<dyn CompletionService>>,
        catalog: Catalog,
        settings: CompletionSettings,
        storage: Option<SQLiteStorage>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let remote = RemoteResponder::new(service, Arc::clone(&catalog), settings);

        let archived_history = match storage.as_ref().map(SQLiteStorage::load_archived_history) {
            Some(Ok(history)) => history,
            Some(Err(e)) => {
                log::error!("Failed to load archived history: {}", e);
                Vec::new()
            }
            None => Vec::new(),
        };

        Self {
            catalog,
            remote,
            transcript: vec![ChatMessage::bot(WELCOME_TEXT)],
            archived_history,
            storage,
            session_id: Uuid::new_v4().to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keeps at most `limit` archived messages in prompt context.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_archive();
        self
    }

    /// Free-text turn. Blank input is ignored and yields `None`.
    pub async fn send_user_text(&mut self, text: &str) -> Option<BotReply> {
        if text.trim().is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        let reply = self.ask_remote(text).await;
        Some(self.record(reply))
    }

    /// Category button tap. Falls through to a free-text turn when the
    /// label is not a quick option or no products match it.
    pub async fn select_category(&mut self, label: &str) -> Option<BotReply> {
        if !is_quick_option(label) {
            log::debug!("'{}' is not a quick option, treating as text", label);
            return self.send_user_text(label).await;
        }

        self.transcript.push(ChatMessage::user(label));

        let reply = match build_category_reply(&self.catalog, label) {
            Some(reply) => reply,
            None => {
                log::info!("No products for {}, asking the assistant instead", label);
                self.ask_remote(label).await
            }
        };
        Some(self.record(reply))
    }

    /// Archives the visible transcript and opens a fresh one.
    pub fn start_new_session(&mut self) {
        let finished = std::mem::replace(
            &mut self.transcript,
            vec![ChatMessage::bot(FRESH_SESSION_TEXT)],
        );

        if let Some(storage) = self.storage.as_mut() {
            let model = self.remote.model_label();
            if let Err(e) = storage.archive_session(&self.session_id, model, &finished) {
                log::error!("Failed to archive session {}: {}", self.session_id, e);
            }
        }

        log::info!("🗂️ Session {} archived ({} messages)", self.session_id, finished.len());
        self.archived_history.extend(finished);
        self.trim_archive();
        self.session_id = Uuid::new_v4().to_string();
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn archived_history(&self) -> &[ChatMessage] {
        &self.archived_history
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_available()
    }

    /// Drops archived sessions from memory and from the history store.
    pub fn forget_history(&mut self) {
        self.archived_history.clear();
        if let Some(storage) = self.storage.as_ref() {
            if let Err(e) = storage.clear_all_history() {
                log::error!("Failed to clear history: {}", e);
            }
        }
    }

    pub fn storage_stats(&self) -> String {
        match self.storage.as_ref() {
            Some(storage) => storage
                .get_stats()
                .unwrap_or_else(|e| format!("Failed to read history stats: {e}")),
            None => "History storage is disabled".to_string(),
        }
    }

    /// Remote call with the transcript as it stood before the newest user turn.
    async fn ask_remote(&self, text: &str) -> BotReply {
        let earlier = &self.transcript[..self.transcript.len().saturating_sub(1)];
        self.remote
            .ask_assistant(text, earlier, &self.archived_history)
            .await
    }

    fn trim_archive(&mut self) {
        let excess = self.archived_history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            self.archived_history.drain(..excess);
        }
    }

    fn record(&mut self, reply: BotReply) -> BotReply {
        log::debug!("Reply from {:?}", reply.source);
        self.transcript.push(reply.message.clone());
        reply
    }
}
