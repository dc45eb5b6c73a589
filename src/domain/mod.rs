//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `assessment` - Question bank, response ledger and the profile scoring pipeline

pub mod assessment;
pub mod foundation;
