//! Foody API access
//!
//! A thin JSON-over-HTTP client plus the login flow that turns
//! credentials into an authenticated [`Session`].

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{authenticate, Session};
pub use client::{ApiClient, ApiResponse};
