use crate::fallback::{canned_reply, DEFAULT_GREETING};
use crate::model::{ChatMessage, Generated, Role};
use crate::pipelines::{call_model, Stage, Trace};
use crate::providers::{chat_prompt, LlmProvider};
use log::{debug, warn};

/// Answer the latest user message in the conversation.
///
/// One stage only: the model reply as-is, or a keyword-matched canned reply
/// on any failure.
pub async fn reply(provider: &dyn LlmProvider, messages: &[ChatMessage]) -> Generated<String> {
    let Some(last_user) = messages.iter().rev().find(|m| m.role == Role::User) else {
        debug!("chat: no user message, returning greeting");
        return Generated::fallback(DEFAULT_GREETING.to_string());
    };

    let mut trace = Trace::new("chat");
    let prompt = chat_prompt(messages, last_user);

    trace.advance(Stage::AwaitingModel);
    match call_model(provider, &prompt).await {
        Ok(text) => {
            trace.advance(Stage::Done);
            Generated::generated(strip_speaker_label(&text).to_string())
        }
        Err(e) => {
            warn!("chat: {}, answering with a canned reply", e);
            trace.advance(Stage::FallbackDone);
            Generated::fallback(canned_reply(messages).to_string())
        }
    }
}

fn strip_speaker_label(text: &str) -> &str {
    let text = text.trim();
    let label = format!("{}: ", Role::Assistant.label());
    text.strip_prefix(label.as_str()).unwrap_or(text).trim_start()
}
