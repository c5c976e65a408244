//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity and role mask from a JWT Bearer token.
//! - [`rbac::RequireList`], [`rbac::RequireCreate`], [`rbac::RequireUpdate`],
//!   [`rbac::RequireDelete`] -- Require one permission bit each.

pub mod auth;
pub mod rbac;
