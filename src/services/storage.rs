use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection};
use std::path::PathBuf;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::core::message::{ChatMessage, Sender};

/// Archived chat sessions kept in SQLite so context survives restarts.
pub struct SQLiteStorage {
    conn: Connection,
    history_limit: usize,
}

impl SQLiteStorage {
    /// Opens (or creates) the database at `db_path`, defaulting to
    /// `~/.config/storefront-assistant/history.db`.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = db_path.unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".config/storefront-assistant/history.db")
        });

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        log::info!("📦 History database opened: {}", db_path.display());

        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    /// Caps how many archived messages `load_archived_history` returns.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                model TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_session_id ON conversations(session_id)",
            [],
        )?;

        Ok(())
    }

    /// Stores a finished session, preserving message order. `model` records
    /// which completion model (or `offline`) served the session.
    pub fn archive_session(
        &mut self,
        session_id: &str,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<()> {
        let timestamp = Local::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO conversations (session_id, role, content, model, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for message in messages {
                stmt.execute(params![
                    session_id,
                    message.sender.prompt_role(),
                    &message.text,
                    model,
                    &timestamp
                ])?;
            }
        }
        tx.commit()?;

        log::debug!("💾 Archived {} messages for session {}", messages.len(), session_id);
        Ok(())
    }

    /// The most recent `history_limit` archived messages, oldest first.
    pub fn load_archived_history(&self) -> Result<Vec<ChatMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, content FROM conversations
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let limit = i64::try_from(self.history_limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            let role: String = row.get(0)?;
            let content: String = row.get(1)?;
            Ok((role, content))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (role, content) = row?;
            result.push(match Sender::from_prompt_role(&role) {
                Sender::User => ChatMessage::user(content),
                Sender::Bot => ChatMessage::bot(content),
            });
        }

        result.reverse();

        log::info!("📖 Loaded {} archived messages", result.len());
        Ok(result)
    }

    pub fn clear_all_history(&self) -> Result<()> {
        let affected = self.conn.execute("DELETE FROM conversations", [])?;
        log::warn!("🗑️ Cleared {} archived messages", affected);
        Ok(())
    }

    pub fn get_stats(&self) -> Result<String> {
        let total: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;

        let sessions: usize = self.conn.query_row(
            "SELECT COUNT(DISTINCT session_id) FROM conversations",
            [],
            |row| row.get(0),
        )?;

        Ok(format!(
            "📊 History: {} archived messages across {} sessions",
            total, sessions
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archived_sessions_load_in_order() {
        let mut storage = SQLiteStorage::in_memory().unwrap();
        storage
            .archive_session("a", "test-model", &[ChatMessage::bot("welcome"), ChatMessage::user("first")])
            .unwrap();
        storage
            .archive_session("b", "test-model", &[ChatMessage::user("second"), ChatMessage::bot("reply")])
            .unwrap();

        let history = storage.load_archived_history().unwrap();
        let turns: Vec<(Sender, &str)> = history.iter().map(|m| (m.sender, m.text.as_str())).collect();
        assert_eq!(
            turns,
            [
                (Sender::Bot, "welcome"),
                (Sender::User, "first"),
                (Sender::User, "second"),
                (Sender::Bot, "reply"),
            ]
        );
    }

    #[test]
    fn stats_and_clearing() {
        let mut storage = SQLiteStorage::in_memory().unwrap();
        storage.archive_session("a", "test-model", &[ChatMessage::user("x")]).unwrap();
        storage.archive_session("b", "test-model", &[ChatMessage::user("y")]).unwrap();
        assert_eq!(
            storage.get_stats().unwrap(),
            "📊 History: 2 archived messages across 2 sessions"
        );

        storage.clear_all_history().unwrap();
        assert!(storage.load_archived_history().unwrap().is_empty());
    }

    #[test]
    fn on_disk_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/history.db");

        {
            let mut storage = SQLiteStorage::new(Some(path.clone())).unwrap();
            storage.archive_session("a", "test-model", &[ChatMessage::user("remember me")]).unwrap();
        }

        let storage = SQLiteStorage::new(Some(path)).unwrap();
        let history = storage.load_archived_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "remember me");
    }

    #[test]
    fn reload_is_capped_to_most_recent_messages() {
        let mut storage = SQLiteStorage::in_memory().unwrap().with_history_limit(4);
        for n in 0..50 {
            let session = format!("s{n}");
            storage
                .archive_session(
                    &session,
                    "test-model",
                    &[ChatMessage::user(format!("q{n}")), ChatMessage::bot(format!("a{n}"))],
                )
                .unwrap();
        }

        let history = storage.load_archived_history().unwrap();
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["q48", "a48", "q49", "a49"]);
        assert_eq!(history[0].sender, Sender::User);
        assert!(storage.get_stats().unwrap().contains("100 archived messages"));
    }

    #[test]
    fn model_column_records_serving_model() {
        let mut storage = SQLiteStorage::in_memory().unwrap();
        storage
            .archive_session("a", "llama-3.3-70b-versatile", &[ChatMessage::user("x")])
            .unwrap();
        storage.archive_session("b", "offline", &[ChatMessage::user("y")]).unwrap();

        let mut stmt = storage
            .conn
            .prepare("SELECT model FROM conversations ORDER BY id")
            .unwrap();
        let models: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(models, ["llama-3.3-70b-versatile", "offline"]);
    }
}
