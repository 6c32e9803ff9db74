//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: errors raised while building domain values

pub mod error;
