//! Data models for the employee management backend.
//!
//! - `Employee`: an employee record, passed through as the backend shapes it
//! - `DeleteConfirmation`: local acknowledgement of a successful delete

pub mod employee;

pub use employee::{DeleteConfirmation, Employee};
