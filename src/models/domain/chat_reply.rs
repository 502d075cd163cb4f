use serde::{Deserialize, Serialize};

/// Outcome of one chat request.
///
/// Serializes as `{"resposta": "..."}` or `{"erro": "..."}`, so exactly one
/// field is ever present on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatReply {
    Resposta(String),
    Erro(String),
}

impl ChatReply {
    pub fn is_error(&self) -> bool {
        matches!(self, ChatReply::Erro(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ChatReply::Resposta(text) | ChatReply::Erro(text) => text,
        }
    }
}
