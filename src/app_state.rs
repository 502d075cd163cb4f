use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::ReferenceContext,
    services::{
        chat_service::ChatService,
        model_service::{ChatModel, GeminiChatModel},
        scraper_service::ScraperService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Scrapes the reference page and wires the responder.
    ///
    /// Any failure here means the chat endpoint must never be served.
    pub async fn new(config: Config) -> AppResult<Self> {
        let scraper = ScraperService::new(config.scrape_timeout())?;
        let text = scraper.fetch_reference_content(&config.reference_url).await?;

        let model = Arc::new(GeminiChatModel::new(&config));
        Self::from_parts(config, model, text)
    }

    /// Wires the state from already-extracted text and a model.
    pub fn from_parts(
        config: Config,
        model: Arc<dyn ChatModel>,
        reference_text: impl Into<String>,
    ) -> AppResult<Self> {
        let context = ReferenceContext::new(reference_text, config.reference_max_chars)?;
        log::info!(
            "Reference context ready ({} characters{})",
            context.char_count(),
            if context.is_truncated() { ", truncated" } else { "" }
        );

        let chat_service = Arc::new(ChatService::new(
            model,
            Arc::new(context),
            config.prompt.clone(),
            config.llm_timeout(),
        ));

        Ok(Self {
            chat_service,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::AppError, services::model_service::MockChatModel};

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_empty_context_refuses_to_start() {
        let result = AppState::from_parts(
            Config::test_config(),
            Arc::new(MockChatModel::new()),
            "   ",
        );
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_context_limit_is_applied() {
        let mut config = Config::test_config();
        config.reference_max_chars = Some(8);

        let state =
            AppState::from_parts(config, Arc::new(MockChatModel::new()), "Programa Jovem")
                .unwrap();
        assert_eq!(state.chat_service.context().as_str(), "Programa");
    }

    #[actix_web::test]
    async fn test_unreachable_reference_page_refuses_to_start() {
        let result = AppState::new(Config::test_config()).await;
        assert!(matches!(result, Err(AppError::ScrapeError(_))));
    }
}
