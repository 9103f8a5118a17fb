//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod get_session_state;
mod run_analysis;

pub use get_session_state::{GetSessionStateHandler, GetSessionStateQuery};
pub use run_analysis::{
    RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler, RunAnalysisResult,
};
