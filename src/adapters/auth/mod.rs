//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 bearer tokens signed with a shared secret
//! - `mock` - Test implementation that doesn't require an identity provider

mod jwt;
mod mock;

pub use jwt::{AccessClaims, JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
