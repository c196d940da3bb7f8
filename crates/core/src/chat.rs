//! The chat-completion capability and plain conversational replies.

use crate::error::RemoteError;
use crate::types::{ChatMessage, Role};

/// A hosted model that turns a message list into one assistant reply.
///
/// Implemented by the HTTP client in `tutor-remote`, and by any closure
/// `Fn(&[ChatMessage]) -> Result<String, RemoteError>` so tests can script
/// the model.
pub trait ChatCompletion {
    /// Send `messages` and return the assistant text.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, RemoteError>;

    /// Single-shot call: one system instruction, one user message.
    fn prompt(&self, system: &str, user: &str) -> Result<String, RemoteError> {
        self.complete(&[ChatMessage::system(system), ChatMessage::user(user)])
    }
}

impl<F> ChatCompletion for F
where
    F: Fn(&[ChatMessage]) -> Result<String, RemoteError>,
{
    fn complete(&self, messages: &[ChatMessage]) -> Result<String, RemoteError> {
        self(messages)
    }
}

/// Answer `query` in the context of `history`.
///
/// The query is appended unless it is already the last user message.
pub fn reply<C: ChatCompletion + ?Sized>(
    chat: &C,
    history: &[ChatMessage],
    query: &str,
) -> Result<String, RemoteError> {
    let mut messages: Vec<ChatMessage> = history
        .iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: m.content.clone(),
            language: None,
        })
        .collect();

    let already_sent = messages
        .last()
        .is_some_and(|m| m.role == Role::User && m.content == query);
    if !already_sent {
        messages.push(ChatMessage::user(query));
    }

    log::debug!("Sending chat completion with {} messages", messages.len());
    chat.complete(&messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use std::cell::RefCell;

    #[test]
    fn test_reply_does_not_duplicate_last_user_message() {
        let seen = RefCell::new(Vec::new());
        let chat = |messages: &[ChatMessage]| -> Result<String, RemoteError> {
            seen.borrow_mut().extend_from_slice(messages);
            Ok("Mitochondria make ATP.".into())
        };

        let history = vec![ChatMessage::user("What do mitochondria do?").in_language(Language::English)];
        let answer = reply(&chat, &history, "What do mitochondria do?").unwrap();

        assert_eq!(answer, "Mitochondria make ATP.");
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].language, None);
    }

    #[test]
    fn test_reply_appends_new_query() {
        let count = RefCell::new(0);
        let chat = |messages: &[ChatMessage]| -> Result<String, RemoteError> {
            *count.borrow_mut() = messages.len();
            Ok(String::new())
        };

        let history = vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello! How can I help?"),
        ];
        reply(&chat, &history, "Explain osmosis").unwrap();
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_prompt_sends_system_then_user() {
        let chat = |messages: &[ChatMessage]| -> Result<String, RemoteError> {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].role, Role::System);
            assert_eq!(messages[1].role, Role::User);
            Ok(messages[1].content.clone())
        };
        assert_eq!(chat.prompt("be brief", "echo").unwrap(), "echo");
    }
}
