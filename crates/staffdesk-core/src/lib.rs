//! Core library for staffdesk.
//!
//! Provides the authenticated API client for the employee management
//! backend, the in-memory admin session it owns, and the record types
//! passed between the backend and the front end.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ClientError, FetchTarget};
pub use auth::{Credentials, Session, SessionData};
pub use config::Config;
pub use models::{DeleteConfirmation, Employee};
