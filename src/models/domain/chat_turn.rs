/// Speaker of a message inside a [`ChatTurn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    Instruction,
    Assistant,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One self-contained conversation: preamble, scripted greeting, user message.
///
/// Built for a single request and dropped once the reply is in, so nothing
/// from one request can reach the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    preamble: ChatMessage,
    greeting: ChatMessage,
    user_message: ChatMessage,
}

impl ChatTurn {
    pub fn new(
        preamble: impl Into<String>,
        greeting: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            preamble: ChatMessage::new(ChatRole::Instruction, preamble),
            greeting: ChatMessage::new(ChatRole::Assistant, greeting),
            user_message: ChatMessage::new(ChatRole::User, user_message),
        }
    }

    /// Messages in the order they are sent to the model.
    pub fn messages(&self) -> [&ChatMessage; 3] {
        [&self.preamble, &self.greeting, &self.user_message]
    }

    pub fn preamble(&self) -> &str {
        &self.preamble.content
    }

    pub fn greeting(&self) -> &str {
        &self.greeting.content
    }

    pub fn user_message(&self) -> &str {
        &self.user_message.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_has_exactly_three_messages_in_order() {
        let turn = ChatTurn::new("instruções", "Olá!", "Quando abrem as inscrições?");
        let roles: Vec<ChatRole> = turn.messages().iter().map(|m| m.role).collect();

        assert_eq!(
            roles,
            vec![ChatRole::Instruction, ChatRole::Assistant, ChatRole::User]
        );
        assert_eq!(turn.user_message(), "Quando abrem as inscrições?");
        assert_eq!(turn.greeting(), "Olá!");
    }
}
