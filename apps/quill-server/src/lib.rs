//! # Quill Server
//!
//! Server-rendered blog with role-gated editing and a back-office.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod views;
