use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
    Client,
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::ModelError,
    models::domain::{ChatMessage, ChatRole, ChatTurn},
};

/// A hosted chat model: takes a full conversation, returns the next reply.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn send_message(&self, turn: &ChatTurn) -> Result<String, ModelError>;
}

/// Gemini through its OpenAI-compatible endpoint.
///
/// No `Debug` derive: the client holds the API key.
pub struct GeminiChatModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiChatModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.google_api_key.expose_secret())
            .with_api_base(&config.llm_base_url);

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        }
    }

    fn build_request(&self, turn: &ChatTurn) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages: turn.messages().into_iter().map(to_request_message).collect(),
            ..Default::default()
        }
    }
}

fn to_request_message(message: &ChatMessage) -> ChatCompletionRequestMessage {
    let content = message.content.clone();
    match message.role {
        ChatRole::Instruction => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(content),
                name: None,
            })
        }
        ChatRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(content),
            name: None,
        }),
        ChatRole::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(content)),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    async fn send_message(&self, turn: &ChatTurn) -> Result<String, ModelError> {
        let request = self.build_request(turn);
        log::debug!("Sending chat turn to model {}", self.model);

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ModelError::EmptyReply)
    }
}
