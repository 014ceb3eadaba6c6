//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Entities, form validation and the authorization gate live here, free of
//! any web or database dependency.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

pub use error::{DomainError, RepoError};
pub use policy::{Action, Decision, authorize};
