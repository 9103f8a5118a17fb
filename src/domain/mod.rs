//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, calendar helpers, errors)
//! - `journal` - Journal entries
//! - `analysis` - Pure period-analysis services (windows, modes, parsing, gating)

pub mod analysis;
pub mod foundation;
pub mod journal;
