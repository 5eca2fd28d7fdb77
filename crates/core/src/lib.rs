//! Shared domain types for the scenagen job orchestration service.
//!
//! Zero internal dependencies. Everything here is usable from the store,
//! the execution engine, and the API surface alike.

pub mod error;
pub mod status;
pub mod types;
pub mod validation;
