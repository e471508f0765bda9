pub mod analysis;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;

pub use analysis::AnalysisReport;
pub use analysis::ConversationAnalyzer;
pub use client::ConversationClient;
pub use config::AppConfig;
pub use errors::*;
