pub mod chat;
pub mod domain;
pub mod metrics;
pub mod ports;

pub use chat::{ChatState, INITIAL_CHAT_TITLE, NEW_CHAT_TITLE};
pub use domain::{
    AuthSession, Budget, ChatMessage, ChatRole, ChatThread, FinancialSummary, LedgerEntry,
    LedgerKind, SavingStatus, StatusColor, User, UserCredentials,
};
pub use metrics::{round2, summarize, MetricsInput};
pub use ports::{DatabaseService, PortError, PortResult, TextGenerationService};
