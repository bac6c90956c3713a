//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::sessions::ChatSessionStore;
use fintrack_core::ports::{DatabaseService, TextGenerationService};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
    pub text_generator: Arc<dyn TextGenerationService>,
    /// In-process chat state, keyed by auth session id.
    pub chat_sessions: ChatSessionStore,
}
