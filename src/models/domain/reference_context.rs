use crate::errors::{AppError, AppResult};

/// Grounding text scraped once at startup. Never empty, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceContext {
    text: String,
    truncated: bool,
}

impl ReferenceContext {
    /// Wraps extracted text, optionally cutting it to `max_chars` characters.
    pub fn new(text: impl Into<String>, max_chars: Option<usize>) -> AppResult<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::ConfigError(
                "reference context is empty; refusing to serve ungrounded answers".to_string(),
            ));
        }

        let (text, truncated) = match max_chars {
            Some(limit) if trimmed.chars().count() > limit => {
                let cut: String = trimmed.chars().take(limit).collect();
                log::warn!(
                    "Reference context truncated to {} characters (limit REFERENCE_MAX_CHARS)",
                    limit
                );
                (cut, true)
            }
            _ => (trimmed.to_string(), false),
        };

        Ok(Self { text, truncated })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
