//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each one
//! holds the ports it needs as `Arc<dyn Port>` and exposes `handle`.

pub mod profile;
pub mod skill;
pub mod sync;
