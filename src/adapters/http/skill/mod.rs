//! HTTP adapter for skill endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateSkillRequest, SkillResponse, UpdateSkillRequest};
pub use routes::skill_routes;
