//! HTTP client used by the terminal chat front-end.
//!
//! The front-end runs as its own process and only talks to the server through
//! `POST /responder`; it keeps its transcript for display and never sends it.

use std::time::Duration;

use serde_json::Value;

use crate::models::dto::ChatRequestDto;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/responder";
pub const WELCOME_MESSAGE: &str =
    "Olá! Estou pronto para ajudar com suas dúvidas sobre o Jovem Programador.";
pub const MISSING_REPLY_MESSAGE: &str = "Erro na resposta da API.";

pub struct ApiClient {
    client: reqwest::Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Sends one question and returns the text to show the user.
    ///
    /// Never fails: transport problems are rendered as a message.
    pub async fn ask(&self, pergunta: &str) -> String {
        match self.post(pergunta).await {
            Ok(body) => reply_text(&body),
            Err(e) => format!("Erro de conexão com a API: {}", e),
        }
    }

    async fn post(&self, pergunta: &str) -> Result<Value, reqwest::Error> {
        let payload = ChatRequestDto {
            texto: pergunta.to_string(),
        };
        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

/// `resposta` when present, else `erro`, else a generic message.
pub fn reply_text(body: &Value) -> String {
    body.get("resposta")
        .or_else(|| body.get("erro"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| MISSING_REPLY_MESSAGE.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// Messages shown on screen during a front-end session.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<(Speaker, String)>,
}

impl Transcript {
    pub fn with_welcome() -> Self {
        let mut transcript = Self::default();
        transcript.push(Speaker::Assistant, WELCOME_MESSAGE);
        transcript
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push((speaker, text.into()));
    }

    pub fn entries(&self) -> &[(Speaker, String)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reply_text_prefers_resposta() {
        assert_eq!(reply_text(&json!({ "resposta": "Sim." })), "Sim.");
    }

    #[test]
    fn test_reply_text_shows_erro() {
        assert_eq!(
            reply_text(&json!({ "erro": "Ocorreu um problema: timeout" })),
            "Ocorreu um problema: timeout"
        );
    }

    #[test]
    fn test_reply_text_missing_fields() {
        assert_eq!(reply_text(&json!({})), MISSING_REPLY_MESSAGE);
        assert_eq!(reply_text(&json!({ "resposta": 42 })), MISSING_REPLY_MESSAGE);
    }

    #[test]
    fn test_transcript_starts_with_welcome() {
        let mut transcript = Transcript::with_welcome();
        transcript.push(Speaker::User, "Oi");

        assert_eq!(
            transcript.entries(),
            &[
                (Speaker::Assistant, WELCOME_MESSAGE.to_string()),
                (Speaker::User, "Oi".to_string()),
            ]
        );
    }

    #[actix_web::test]
    async fn test_ask_reports_connection_errors() {
        let client = ApiClient::new("http://127.0.0.1:9/responder", Duration::from_secs(1)).unwrap();
        let text = client.ask("oi").await;

        assert!(text.starts_with("Erro de conexão com a API:"));
    }
}
