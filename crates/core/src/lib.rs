//! Domain logic for the broken-car admin API.
//!
//! Everything in this crate is pure: no I/O, no database handles. The API and
//! repository layers call into it to authorize callers, shape request
//! payloads, and turn list parameters into a [`query::QueryDescription`].

pub mod broken_car;
pub mod error;
pub mod permissions;
pub mod query;
pub mod types;
