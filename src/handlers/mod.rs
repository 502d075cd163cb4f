pub mod chat_handler;

pub use chat_handler::{configure, health_check, json_config, responder};
