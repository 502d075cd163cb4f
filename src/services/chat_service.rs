use std::{sync::Arc, time::Duration};

use crate::{
    config::PromptSettings,
    constants::prompts::build_preamble,
    errors::ModelError,
    models::domain::{ChatReply, ChatTurn, ReferenceContext},
    services::model_service::ChatModel,
};

/// Quote and emphasis marks models put around a verbatim sentence.
const REPLY_QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’', '«', '*', '_', '`'];

/// Answers questions using only the reference context.
///
/// Holds no conversation state; every call builds its own [`ChatTurn`].
pub struct ChatService {
    model: Arc<dyn ChatModel>,
    context: Arc<ReferenceContext>,
    prompt: PromptSettings,
    timeout: Duration,
}

impl ChatService {
    pub fn new(
        model: Arc<dyn ChatModel>,
        context: Arc<ReferenceContext>,
        prompt: PromptSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            context,
            prompt,
            timeout,
        }
    }

    pub fn context(&self) -> &ReferenceContext {
        &self.context
    }

    /// Fresh conversation for `user_message`: preamble, greeting, question.
    pub fn build_turn(&self, user_message: &str) -> ChatTurn {
        ChatTurn::new(
            build_preamble(&self.prompt, self.context.as_str()),
            self.prompt.greeting.clone(),
            user_message,
        )
    }

    /// Runs one chat turn. Model failures become [`ChatReply::Erro`].
    pub async fn respond(&self, user_message: &str) -> ChatReply {
        match self.ask_model(user_message).await {
            Ok(text) => ChatReply::Resposta(self.enforce_fallback(text)),
            Err(e) => {
                log::warn!("Model call failed: {}", e);
                ChatReply::Erro(format!("Ocorreu um problema: {}", e))
            }
        }
    }

    async fn ask_model(&self, user_message: &str) -> Result<String, ModelError> {
        let turn = self.build_turn(user_message);
        tokio::time::timeout(self.timeout, self.model.send_message(&turn))
            .await
            .map_err(|_| ModelError::Timeout(self.timeout))?
    }

    /// A reply that opens with the refusal sentence becomes exactly that
    /// sentence, dropping quotes or commentary the model wrapped around it.
    fn enforce_fallback(&self, reply: String) -> String {
        let fallback = self.prompt.fallback_sentence.as_str();
        let opening = reply
            .trim_start()
            .trim_start_matches(REPLY_QUOTES)
            .trim_start();
        if opening.starts_with(fallback) {
            fallback.to_string()
        } else {
            reply
        }
    }
}
