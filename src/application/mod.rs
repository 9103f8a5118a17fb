//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (run an analysis) are separated from queries (read the session state).

pub mod handlers;
pub mod session;

pub use handlers::{
    GetSessionStateHandler, GetSessionStateQuery, RunAnalysisCommand, RunAnalysisError,
    RunAnalysisHandler, RunAnalysisResult,
};
pub use session::{latest_completed, SessionState};
