//! # Verse Core
//!
//! The domain layer of BloggerVerse.
//! Posts, users, code snippets and site settings, the slug resolver, and the
//! services that own the admin rules. No I/O lives here; storage, caching and
//! authentication are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod seed;
pub mod service;
pub mod slug;

pub use error::{DomainError, RepoError};
pub use service::{PostService, SettingsService};
