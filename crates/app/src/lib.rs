//! Fee settings retrieval and cart summary recompute lifecycle.

pub mod config;
pub mod observability;
pub mod recompute;
pub mod settings;
