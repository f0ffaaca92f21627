//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain: tools that drive the Canvas API.

pub mod tools;
