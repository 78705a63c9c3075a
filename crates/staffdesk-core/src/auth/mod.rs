//! Authentication module for the admin session.
//!
//! This module provides:
//! - `Session`: the single bearer token held for the life of a client
//! - `Credentials`: the identifier/secret pair sent to the login endpoint
//!
//! Nothing here touches disk. A session ends when its client is dropped.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::{Session, SessionData};
