//! Bulk Key Maintenance Module
//!
//! Removes groups of keys selected by a glob pattern (for example `user:*`).
//! Matching is left entirely to the store; the pattern is forwarded untouched.

pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
