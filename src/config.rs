use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const STOREFRONT_NAME: &str = "Pakeeza Products";
pub const STOREFRONT_URL: &str = "https://pakeezaproducts.store";
pub const STOREFRONT_DOMAIN: &str = "pakeezaproducts.store";

/// Hard limit for a single completion round trip.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 256;

/// Archived messages reloaded into prompt context at start.
pub const DEFAULT_HISTORY_LIMIT: usize = 40;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub catalog_path: Option<PathBuf>,
    pub persist_history: bool,
    pub history_db_path: Option<PathBuf>,
    pub history_limit: usize,
    pub assistant_name: String,
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();

        let api_key = env::var("STOREFRONT_API_KEY")
            .or_else(|_| env::var("GROQ_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let llm_base_url = env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let llm_temperature = env::var("LLM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(DEFAULT_LLM_TEMPERATURE)
            .clamp(0.0, 1.0);

        let llm_max_tokens = env::var("LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_LLM_MAX_TOKENS)
            .max(1);

        let catalog_path = env::var("CATALOG_PATH").ok().map(PathBuf::from);

        let persist_history = env::var("PERSIST_HISTORY")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let history_db_path = env::var("HISTORY_DB_PATH").ok().map(PathBuf::from);

        let history_limit = env::var("HISTORY_LIMIT")
            .ok()
            .and_then(|v| parse_limit(&v))
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Self {
            api_key,
            llm_base_url,
            llm_model,
            llm_temperature,
            llm_max_tokens,
            catalog_path,
            persist_history,
            history_db_path,
            history_limit,
            assistant_name: format!("{STOREFRONT_NAME} Assistant"),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

fn parse_limit(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_defaults_to_enabled() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("anything"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn history_limit_parsing() {
        assert_eq!(parse_limit(" 12 "), Some(12));
        assert_eq!(parse_limit("0"), Some(0));
        assert_eq!(parse_limit("-3"), None);
        assert_eq!(parse_limit("lots"), None);
    }
}
