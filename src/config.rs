use std::{env, time::Duration};

use secrecy::SecretString;
use url::Url;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_REFERENCE_URL: &str = "https://www.jovemprogramador.com.br/duvidas.php";
pub const DEFAULT_TOPIC: &str = "Programa Jovem Programador";
pub const DEFAULT_GREETING: &str = "Olá! Como posso te ajudar?";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Wording the responder injects into every conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptSettings {
    pub topic: String,
    pub fallback_sentence: String,
    pub greeting: String,
}

impl PromptSettings {
    pub fn for_topic(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            fallback_sentence: format!(
                "Desculpe, minha função é responder apenas sobre o {}.",
                topic
            ),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub google_api_key: SecretString,
    pub reference_url: String,
    pub prompt: PromptSettings,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    pub scrape_timeout_secs: u64,
    pub reference_max_chars: Option<usize>,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset. Numeric values that fail to parse fall
    /// back to their defaults.
    pub fn from_source<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let google_api_key = get("GOOGLE_API_KEY")
            .map(SecretString::from)
            .ok_or_else(|| {
                AppError::ConfigError("GOOGLE_API_KEY is not set".to_string())
            })?;

        let reference_url =
            get("REFERENCE_URL").unwrap_or_else(|| DEFAULT_REFERENCE_URL.to_string());
        validate_reference_url(&reference_url)?;

        let topic = get("CHAT_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string());
        let mut prompt = PromptSettings::for_topic(&topic);
        if let Some(fallback) = get("CHAT_FALLBACK") {
            prompt.fallback_sentence = fallback;
        }
        if let Some(greeting) = get("CHAT_GREETING") {
            prompt.greeting = greeting;
        }

        Ok(Self {
            google_api_key,
            reference_url,
            prompt,
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_timeout_secs: get("LLM_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            scrape_timeout_secs: get("SCRAPE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            reference_max_chars: get("REFERENCE_MAX_CHARS")
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0),
            web_server_host: get("WEB_SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            web_server_port: get("WEB_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            google_api_key: SecretString::from("test-api-key".to_string()),
            reference_url: "http://127.0.0.1:9/duvidas.php".to_string(),
            prompt: PromptSettings::for_topic(DEFAULT_TOPIC),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_base_url: "http://127.0.0.1:9/openai".to_string(),
            llm_timeout_secs: 5,
            scrape_timeout_secs: 1,
            reference_max_chars: None,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            cors_allowed_origin: None,
        }
    }
}

fn validate_reference_url(raw: &str) -> AppResult<()> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::ConfigError(format!(
            "REFERENCE_URL must use http or https, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_source(lookup(&[("GOOGLE_API_KEY", "abc")])).unwrap();

        assert_eq!(config.google_api_key.expose_secret(), "abc");
        assert_eq!(config.reference_url, DEFAULT_REFERENCE_URL);
        assert_eq!(config.llm_model, "gemini-1.5-flash");
        assert_eq!(config.llm_timeout_secs, 60);
        assert_eq!(config.scrape_timeout_secs, 10);
        assert_eq!(config.web_server_port, 8000);
        assert_eq!(config.reference_max_chars, None);
        assert_eq!(
            config.prompt.fallback_sentence,
            "Desculpe, minha função é responder apenas sobre o Programa Jovem Programador."
        );
        assert_eq!(config.prompt.greeting, "Olá! Como posso te ajudar?");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_source(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err = Config::from_source(lookup(&[("GOOGLE_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_reference_url_is_fatal() {
        let err = Config::from_source(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("REFERENCE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err = Config::from_source(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("REFERENCE_URL", "ftp://example.com/page"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_source(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("CHAT_TOPIC", "Clube de Xadrez"),
            ("CHAT_GREETING", "Oi!"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("WEB_SERVER_PORT", "not-a-port"),
            ("REFERENCE_MAX_CHARS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.prompt.topic, "Clube de Xadrez");
        assert_eq!(
            config.prompt.fallback_sentence,
            "Desculpe, minha função é responder apenas sobre o Clube de Xadrez."
        );
        assert_eq!(config.prompt.greeting, "Oi!");
        assert_eq!(config.llm_timeout(), Duration::from_secs(15));
        assert_eq!(config.web_server_port, 8000);
        assert_eq!(config.reference_max_chars, None);
    }

    #[test]
    fn test_explicit_fallback_sentence() {
        let config = Config::from_source(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("CHAT_FALLBACK", "Só falo sobre o programa."),
            ("REFERENCE_MAX_CHARS", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.prompt.fallback_sentence, "Só falo sobre o programa.");
        assert_eq!(config.reference_max_chars, Some(5000));
    }
}
