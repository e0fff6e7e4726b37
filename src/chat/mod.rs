// AI assistant chat session
// Stateless API underneath: every turn replays the full history

use serde::{Deserialize, Serialize};

use crate::gemini::types::{Content, GenerateContentRequest};
use crate::gemini::{GeminiClient, GeminiError};
use crate::insect::prompts;
use crate::settings::ModelSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String, // "user" or "model"
    pub text: String,
}

pub struct ChatSession {
    insect_name: String,
    system_instruction: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(insect_name: impl Into<String>) -> Self {
        let insect_name = insect_name.into();
        let greeting = format!(
            "Hi! I'm Professor Buzz. Ask me anything about the {}!",
            insect_name
        );
        Self {
            system_instruction: prompts::chat_system_instruction(&insect_name),
            insect_name,
            history: vec![ChatMessage {
                role: "model".to_string(),
                text: greeting,
            }],
        }
    }

    pub fn insect_name(&self) -> &str {
        &self.insect_name
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send one user turn and return the model's reply.
    ///
    /// The user turn stays in the history even when the call fails, matching
    /// the chat UI which keeps the bubble and shows an inline apology.
    pub async fn send(
        &mut self,
        client: &GeminiClient,
        models: &ModelSettings,
        text: impl Into<String>,
    ) -> Result<String, GeminiError> {
        self.history.push(ChatMessage {
            role: "user".to_string(),
            text: text.into(),
        });

        // The greeting is a UI fixture, not a real model turn; the API
        // requires conversations to start with a user message
        let contents: Vec<Content> = self
            .history
            .iter()
            .skip(1)
            .map(|message| match message.role.as_str() {
                "user" => Content::user_text(&message.text),
                _ => Content::model_text(&message.text),
            })
            .collect();

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system_text(&self.system_instruction)),
            generation_config: None,
        };

        let response = client.generate_content(&models.text_model, &request).await?;
        let reply = response
            .first_text()
            .ok_or(GeminiError::EmptyResponse)?
            .to_string();

        self.history.push(ChatMessage {
            role: "model".to_string(),
            text: reply.clone(),
        });
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = ChatSession::new("Monarch Butterfly");
        assert_eq!(session.insect_name(), "Monarch Butterfly");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, "model");
        assert!(session.history()[0].text.contains("Monarch Butterfly"));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_user_turn() {
        // Nothing listens on this port, so the call fails immediately
        let client = GeminiClient::with_base_url("test-key", "http://127.0.0.1:9");
        let models = ModelSettings::default();
        let mut session = ChatSession::new("Firefly");

        let result = session.send(&client, &models, "Why do you glow?").await;
        assert!(result.is_err());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].role, "user");
        assert_eq!(session.history()[1].text, "Why do you glow?");
    }
}
