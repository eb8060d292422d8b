//! # Verse Shared
//!
//! Request and response bodies of the BloggerVerse HTTP API, with the input
//! rules each request must satisfy before it reaches the services.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
