//! HTTP access layer: transport, refresh pipeline, wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! Resource services and the auth store talk to the API only through
//! [`HttpClient`]. Session cookies live in the transport; nothing above this
//! layer sees or stores a token.

pub mod endpoints;
pub mod failure;
pub mod http;
pub mod query;
pub mod refresh;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use failure::{AuthFailureHook, AuthFailureSubscriber};
pub use http::HttpClient;
pub use query::{QueryBuilder, SortOrder};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
pub use types::{ApiError, MeResponse, Meta, Page, SignInRequest};
