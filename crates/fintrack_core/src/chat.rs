//! Multi-chat session bookkeeping for the AI assistant.
//!
//! A login session owns one [`ChatState`]: an insertion-ordered list of
//! conversation threads plus a pointer to the active one. The state is an
//! explicit value passed to and returned from each handler, never ambient
//! state, so the whole machine is testable in isolation.
//!
//! Every operation starts with [`ChatState::ensure_active_thread`], the one
//! invariant-repair step: if the thread list is empty or the active pointer
//! dangles, a fresh thread is appended and activated.

use uuid::Uuid;

use crate::domain::{ChatMessage, ChatRole, ChatThread};
use crate::ports::TextGenerationService;

/// Title given to threads the user creates explicitly.
pub const NEW_CHAT_TITLE: &str = "New Chat";
/// Title given to threads created by invariant repair.
pub const INITIAL_CHAT_TITLE: &str = "Initial Chat";

/// A thread's title is replaced by its first user message, cut to this many
/// characters.
const TITLE_MAX_CHARS: usize = 30;

/// The per-session chat state machine: `NoChats` is simply the empty list.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Insertion-ordered; no two threads share an id.
    pub threads: Vec<ChatThread>,
    /// Invariant: when set, references a thread in `threads`. A dangling
    /// pointer is healed by `ensure_active_thread` on the next operation.
    pub active_id: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The thread the active pointer currently resolves to, if any.
    pub fn active_thread(&self) -> Option<&ChatThread> {
        let id = self.active_id.as_deref()?;
        self.threads.iter().find(|t| t.id == id)
    }

    fn active_thread_mut(&mut self) -> Option<&mut ChatThread> {
        let id = self.active_id.clone()?;
        self.threads.iter_mut().find(|t| t.id == id)
    }

    /// Repairs the session invariant: if no thread exists or the active
    /// pointer does not resolve, appends a fresh empty thread with
    /// `default_title` and makes it active. Existing threads are never
    /// discarded. Returns the active thread's id.
    pub fn ensure_active_thread(&mut self, default_title: &str) -> String {
        if self.active_thread().is_none() {
            let thread = fresh_thread(default_title);
            let id = thread.id.clone();
            self.threads.push(thread);
            self.active_id = Some(id);
        }
        self.active_id.clone().unwrap_or_default()
    }

    /// Appends a new empty thread and makes it active.
    pub fn new_chat(&mut self) -> String {
        let thread = fresh_thread(NEW_CHAT_TITLE);
        let id = thread.id.clone();
        self.threads.push(thread);
        self.active_id = Some(id.clone());
        id
    }

    /// Points the session at `id` unconditionally. No existence check is
    /// performed, the caller is trusted; a dangling id is healed by the
    /// repair step on the next operation.
    pub fn select_chat(&mut self, id: &str) {
        self.active_id = Some(id.to_string());
    }

    /// Removes the thread with `id`. If it was active, the pointer is
    /// cleared and the next access auto-creates a fresh thread.
    pub fn delete_chat(&mut self, id: &str) {
        self.threads.retain(|t| t.id != id);
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
        }
    }

    /// Appends the user's message to the active thread (auto-created if
    /// missing), asks the collaborator for a completion, and appends the
    /// reply. The prompt is `text` alone: the accumulated transcript is
    /// never forwarded, so each call is stateless from the collaborator's
    /// perspective even though a visible transcript builds up.
    ///
    /// A failed generation is captured into the transcript as an
    /// `Error: ...` entry rather than propagated; the operation itself
    /// always succeeds.
    pub async fn post_message(&mut self, text: &str, generator: &dyn TextGenerationService) {
        self.ensure_active_thread(INITIAL_CHAT_TITLE);

        // Repair ran above, so the active thread exists.
        if let Some(thread) = self.active_thread_mut() {
            thread.messages.push(ChatMessage {
                role: ChatRole::User,
                content: text.to_string(),
            });
        }

        let reply = match generator.generate(text).await {
            Ok(answer) => answer,
            Err(e) => format!("Error: {e}"),
        };

        if let Some(thread) = self.active_thread_mut() {
            thread.messages.push(ChatMessage {
                role: ChatRole::Ai,
                content: reply,
            });
            // First exchange names the thread after the opening question.
            if thread.messages.len() <= 2 {
                thread.title = text.chars().take(TITLE_MAX_CHARS).collect();
            }
        }
    }
}

fn fresh_thread(title: &str) -> ChatThread {
    ChatThread {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        messages: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerationService for EchoGenerator {
        async fn generate(&self, prompt: &str) -> PortResult<String> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerationService for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> PortResult<String> {
            Err(PortError::Unexpected("model offline".to_string()))
        }
    }

    #[tokio::test]
    async fn posting_into_empty_state_creates_exactly_one_thread() {
        let mut state = ChatState::new();
        state.post_message("hello there", &EchoGenerator).await;

        assert_eq!(state.threads.len(), 1);
        let thread = state.active_thread().expect("active thread");
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.messages[0].role, ChatRole::User);
        assert_eq!(thread.messages[0].content, "hello there");
        assert_eq!(thread.messages[1].role, ChatRole::Ai);
        assert_eq!(thread.messages[1].content, "echo: hello there");
    }

    #[tokio::test]
    async fn generation_failure_is_captured_in_transcript() {
        let mut state = ChatState::new();
        state.post_message("hello", &FailingGenerator).await;

        let thread = state.active_thread().unwrap();
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.messages[1].role, ChatRole::Ai);
        assert!(thread.messages[1].content.starts_with("Error: "));
        assert!(thread.messages[1].content.contains("model offline"));
    }

    #[tokio::test]
    async fn first_exchange_titles_the_thread() {
        let mut state = ChatState::new();
        let long_question = "what is the best way to budget my monthly salary?";
        state.post_message(long_question, &EchoGenerator).await;

        let thread = state.active_thread().unwrap();
        assert_eq!(thread.title, long_question.chars().take(30).collect::<String>());
        assert_eq!(thread.title.chars().count(), 30);
    }

    #[tokio::test]
    async fn later_exchanges_keep_the_title() {
        let mut state = ChatState::new();
        state.post_message("first question", &EchoGenerator).await;
        state.post_message("second question", &EchoGenerator).await;

        let thread = state.active_thread().unwrap();
        assert_eq!(thread.messages.len(), 4);
        assert_eq!(thread.title, "first question");
    }

    #[test]
    fn new_chat_appends_and_activates() {
        let mut state = ChatState::new();
        let first = state.new_chat();
        let second = state.new_chat();

        assert_eq!(state.threads.len(), 2);
        assert_ne!(first, second);
        assert_eq!(state.active_id.as_deref(), Some(second.as_str()));
        assert_eq!(state.threads[1].title, NEW_CHAT_TITLE);
        assert!(state.threads[1].messages.is_empty());
    }

    #[test]
    fn deleting_active_chat_clears_pointer_and_repair_appends() {
        let mut state = ChatState::new();
        let keep = state.new_chat();
        let doomed = state.new_chat();

        state.delete_chat(&doomed);
        assert!(state.active_id.is_none());
        assert_eq!(state.threads.len(), 1);

        // Next access auto-creates a fresh default-titled thread without
        // touching the surviving one.
        let repaired = state.ensure_active_thread(INITIAL_CHAT_TITLE);
        assert_ne!(repaired, keep);
        assert_eq!(state.threads.len(), 2);
        assert_eq!(state.threads[0].id, keep);
        let active = state.active_thread().unwrap();
        assert_eq!(active.title, INITIAL_CHAT_TITLE);
        assert!(active.messages.is_empty());
    }

    #[test]
    fn deleting_inactive_chat_keeps_pointer() {
        let mut state = ChatState::new();
        let first = state.new_chat();
        let second = state.new_chat();

        state.delete_chat(&first);
        assert_eq!(state.active_id.as_deref(), Some(second.as_str()));
        assert_eq!(state.threads.len(), 1);
    }

    #[test]
    fn select_chat_is_unconditional_and_repair_heals_dangling() {
        let mut state = ChatState::new();
        let real = state.new_chat();
        state.select_chat("no-such-thread");
        assert_eq!(state.active_id.as_deref(), Some("no-such-thread"));
        assert!(state.active_thread().is_none());

        state.ensure_active_thread(INITIAL_CHAT_TITLE);
        assert!(state.active_thread().is_some());
        // The dangling pointer was healed by appending, not by reusing the
        // unrelated existing thread.
        assert_eq!(state.threads.len(), 2);
        assert_eq!(state.threads[0].id, real);
    }

    #[test]
    fn ensure_is_a_noop_when_pointer_resolves() {
        let mut state = ChatState::new();
        let id = state.new_chat();
        let ensured = state.ensure_active_thread(INITIAL_CHAT_TITLE);
        assert_eq!(ensured, id);
        assert_eq!(state.threads.len(), 1);
    }

    #[tokio::test]
    async fn thread_ids_are_fresh_opaque_tokens() {
        let mut state = ChatState::new();
        state.post_message("same text", &EchoGenerator).await;
        let first_id = state.active_thread().unwrap().id.clone();

        state.delete_chat(&first_id);
        state.post_message("same text", &EchoGenerator).await;
        let second_id = state.active_thread().unwrap().id.clone();

        assert_ne!(first_id, second_id);
        assert!(!first_id.contains("same text"));
    }
}
