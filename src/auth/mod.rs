//! Authentication state: session, store, and token helpers.

pub mod session;
pub mod store;
pub mod token;

pub use session::Session;
pub use store::AuthStore;
