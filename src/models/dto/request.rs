use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /responder`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ChatRequestDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub texto: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("texto must not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = ChatRequestDto {
            texto: "Qual a idade mínima?".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_request_is_invalid() {
        for texto in ["", "   ", "\n\t"] {
            let request = ChatRequestDto {
                texto: texto.to_string(),
            };
            assert!(request.validate().is_err(), "{texto:?} should be rejected");
        }
    }

    #[test]
    fn test_deserialize_requires_texto() {
        let parsed: Result<ChatRequestDto, _> = serde_json::from_str(r#"{"text": "oi"}"#);
        assert!(parsed.is_err());

        let parsed: ChatRequestDto = serde_json::from_str(r#"{"texto": "oi"}"#).unwrap();
        assert_eq!(parsed.texto, "oi");
    }
}
