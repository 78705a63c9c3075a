//! REST API client module for the employee management backend.
//!
//! This module provides the `ApiClient` for logging in as an admin and
//! listing, adding, viewing and deleting employee records.
//!
//! The backend uses bearer token authentication obtained from its
//! `/auth/login` endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ClientError, FetchTarget};
