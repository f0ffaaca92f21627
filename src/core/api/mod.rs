//! Canvas REST API access.
//!
//! - `request.rs` - transport-agnostic request descriptions
//! - `client.rs` - auth, URL resolution and response interpretation
//! - `executor.rs` - the single network seam (`reqwest` in production)
//! - `error.rs` - error taxonomy surfaced to tool callers

mod client;
mod error;
mod executor;
mod request;

pub use client::{API_PREFIX, ApiClient, REQUEST_TIMEOUT_SECS};
pub use error::{ApiError, ApiResult};
pub use executor::{HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor};
pub use request::{HttpMethod, RemoteRequest};

#[cfg(test)]
pub(crate) use client::testing;
