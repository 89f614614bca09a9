//! HTTP adapter - the REST API.
//!
//! One sub-module per resource, each with its own DTOs, handlers and
//! routes; `router` mounts them under `/api`.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod profile;
pub mod router;
pub mod skill;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, with_http_layers};
pub use state::AppState;
