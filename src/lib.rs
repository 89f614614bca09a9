//! CodeCV - developer CV service.
//!
//! Users keep a CV profile with skills; linking a GitHub account lets the
//! service snapshot recent repositories and derive skills from the languages
//! they use.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
