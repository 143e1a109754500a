//! Prompt construction from an advisor persona and the conversation window.

use crate::completion::{PromptMessage, PromptRole};
use crate::models::chat::{Advisor, MessageRecord};

/// System entry describing the advisor's persona.
pub fn system_prompt(advisor: &Advisor) -> String {
    format!(
        "You are {}, a financial advisor. {} Keep your responses concise (less than 50 words) and to the point.",
        advisor.name, advisor.persona
    )
}

/// System entry followed by `window` (oldest first) as user/assistant turns.
pub fn build_prompt(advisor: &Advisor, window: &[MessageRecord]) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(window.len() + 1);
    messages.push(PromptMessage::system(system_prompt(advisor)));
    messages.extend(window.iter().map(|m| PromptMessage {
        role: if m.from_user {
            PromptRole::User
        } else {
            PromptRole::Assistant
        },
        content: m.message.clone(),
    }));
    messages
}
