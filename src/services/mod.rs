pub mod chat_service;
pub mod model_service;
pub mod scraper_service;
