//! HTTP adapter for profile endpoints, including GitHub sync.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProfileFieldsRequest, ProfileResponse, SyncRequest};
pub use routes::profile_routes;
